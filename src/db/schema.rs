// Database schema initialization

use color_eyre::Result;

pub async fn create_schema(conn: &libsql::Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            name TEXT,
            profile_image TEXT,
            role TEXT DEFAULT 'user' CHECK (role IN ('user', 'admin')),
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            user_email TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (user_email) REFERENCES users (email) ON DELETE CASCADE
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS subjects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL,
            description TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS topics (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (subject_id) REFERENCES subjects (id) ON DELETE CASCADE,
            UNIQUE(subject_id, name)
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_id INTEGER NOT NULL,
            topic_id INTEGER,
            text TEXT NOT NULL,
            options TEXT NOT NULL, -- JSON array of option strings
            correct_index INTEGER NOT NULL,
            difficulty TEXT DEFAULT 'medium' CHECK (difficulty IN ('easy', 'medium', 'hard')),
            explanation TEXT,
            created_by TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (subject_id) REFERENCES subjects (id) ON DELETE CASCADE,
            FOREIGN KEY (topic_id) REFERENCES topics (id) ON DELETE SET NULL,
            FOREIGN KEY (created_by) REFERENCES users (email) ON DELETE SET NULL
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS quiz_results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_email TEXT NOT NULL,
            subject_id INTEGER,
            score INTEGER NOT NULL,
            total_questions INTEGER NOT NULL,
            percentage REAL NOT NULL,
            correct_answers INTEGER NOT NULL,
            wrong_answers INTEGER NOT NULL,
            skipped_answers INTEGER NOT NULL,
            time_taken INTEGER, -- in seconds
            completed_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (user_email) REFERENCES users (email) ON DELETE CASCADE,
            FOREIGN KEY (subject_id) REFERENCES subjects (id) ON DELETE SET NULL
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS quiz_result_details (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            result_id INTEGER NOT NULL,
            question_id INTEGER NOT NULL,
            user_answer INTEGER,
            is_correct BOOLEAN NOT NULL,
            time_spent INTEGER, -- in seconds
            FOREIGN KEY (result_id) REFERENCES quiz_results (id) ON DELETE CASCADE,
            FOREIGN KEY (question_id) REFERENCES questions (id) ON DELETE CASCADE
        )
        "#,
        (),
    )
    .await?;

    seed_defaults(conn).await?;

    Ok(())
}

/// Default subjects, topics, and the starter quiz. `INSERT OR IGNORE` keeps
/// restarts idempotent.
async fn seed_defaults(conn: &libsql::Connection) -> Result<()> {
    conn.execute(
        r#"
        INSERT OR IGNORE INTO subjects (id, name, description) VALUES
        (1, 'Mathematics', 'Mathematical concepts and problem solving'),
        (2, 'Science', 'Physics, Chemistry, Biology and other sciences'),
        (3, 'History', 'Historical events, dates, and figures'),
        (4, 'General Knowledge', 'Current affairs, geography, and miscellaneous topics')
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        INSERT OR IGNORE INTO topics (subject_id, name, description) VALUES
        (1, 'Algebra', 'Algebraic equations and expressions'),
        (1, 'Geometry', 'Shapes, angles, and spatial reasoning'),
        (1, 'Calculus', 'Derivatives, integrals, and limits'),
        (2, 'Physics', 'Laws of motion, energy, and matter'),
        (2, 'Chemistry', 'Elements, compounds, and reactions'),
        (2, 'Biology', 'Living organisms and life processes'),
        (3, 'World History', 'Major historical events and civilizations'),
        (3, 'Indian History', 'Indian historical events and culture'),
        (4, 'Current Affairs', 'Recent news and events'),
        (4, 'Geography', 'Countries, capitals, and physical features')
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        INSERT OR IGNORE INTO questions (id, subject_id, text, options, correct_index) VALUES
        (1, 4, 'Which language runs in a web browser?',
         '["Java","C","Python","JavaScript"]', 3),
        (2, 4, 'What does CSS stand for?',
         '["Central Style Sheets","Cascading Style Sheets","Cascading Simple Sheets","Cars SUVs Sailboats"]', 1),
        (3, 4, 'What does HTML stand for?',
         '["Hypertext Markup Language","Hyper Trainer Marking Language","Hypertext Marketing Language","Hyper Text Markup Leveler"]', 0),
        (4, 4, 'What year was JavaScript launched?',
         '["1996","1995","1994","None of the above"]', 1),
        (5, 4, 'Which company developed React?',
         '["Google","Microsoft","Facebook","Twitter"]', 2)
        "#,
        (),
    )
    .await?;

    Ok(())
}
