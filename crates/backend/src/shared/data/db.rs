use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const CREATE_SALES_ENTRY_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS a001_sales_entry (
        id TEXT PRIMARY KEY NOT NULL,
        invoice_no TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'Pending',
        date TEXT NOT NULL,
        term_days INTEGER,
        due_date TEXT,
        customer TEXT,
        product TEXT,
        revenue_category TEXT NOT NULL DEFAULT '',
        revenue_type TEXT,
        unit TEXT,
        quantity REAL NOT NULL DEFAULT 0,
        unit_price REAL NOT NULL DEFAULT 0,
        discount_amount REAL NOT NULL DEFAULT 0,
        total_amount REAL NOT NULL DEFAULT 0,
        cash_received REAL NOT NULL DEFAULT 0,
        remaining_balance REAL NOT NULL DEFAULT 0,
        payment_status TEXT NOT NULL DEFAULT 'Pending',
        description TEXT,
        notes TEXT
    );
"#;

const CREATE_SALES_ENTRY_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_a001_sales_entry_date ON a001_sales_entry (date);";

/// Build a sqlite:// URL, normalizing Windows separators
fn sqlite_url(db_file: &Path) -> anyhow::Result<String> {
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db_url = sqlite_url(db_file)?;
    tracing::info!("Connecting to database: {}", db_url);
    let conn = Database::connect(&db_url).await?;

    // Minimal schema bootstrap
    for sql in [CREATE_SALES_ENTRY_TABLE, CREATE_SALES_ENTRY_DATE_INDEX] {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }
    tracing::info!("Table a001_sales_entry is ready");

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
