//! Database schema definitions
//!
//! Structured-value columns (`settings`, `slots`, `intake_responses`) are
//! `TEXT` holding serialized JSON.

/// SQL to create the practitioners table
pub const CREATE_PRACTITIONERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS practitioners (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL CHECK (length(name) > 0),
    email           TEXT NOT NULL UNIQUE CHECK (length(email) > 0),
    settings        TEXT
)
"#;

/// SQL to create the availability table
pub const CREATE_AVAILABILITY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS availability (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    practitioner_id INTEGER NOT NULL REFERENCES practitioners(id),
    slots           TEXT
)
"#;

/// SQL to create the bookings table
///
/// `client_info` only ever holds ciphertext.
pub const CREATE_BOOKINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS bookings (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    practitioner_id  INTEGER NOT NULL REFERENCES practitioners(id),
    client_info      TEXT NOT NULL,
    status           TEXT NOT NULL DEFAULT 'pending',
    intake_responses TEXT,
    created_at       TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// All table creation statements in dependency order
pub const CREATE_ALL_TABLES: &[&str] = &[
    CREATE_PRACTITIONERS_TABLE,
    CREATE_AVAILABILITY_TABLE,
    CREATE_BOOKINGS_TABLE,
];

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
    /// Serialized JSON in a TEXT column
    Json,
    /// `%Y-%m-%d %H:%M:%S` UTC in a TEXT column
    Timestamp,
}

/// Static description of one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub nullable: bool,
    pub unique: bool,
    pub primary_key: bool,
    /// Referenced `(table, column)`
    pub references: Option<(&'static str, &'static str)>,
    /// SQL default expression
    pub default: Option<&'static str>,
}

impl ColumnDef {
    const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            nullable: true,
            unique: false,
            primary_key: false,
            references: None,
            default: None,
        }
    }

    const fn id() -> Self {
        let mut col = Self::new("id", ColumnType::Integer);
        col.nullable = false;
        col.primary_key = true;
        col
    }

    const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    const fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some((table, column));
        self
    }

    const fn default(mut self, expr: &'static str) -> Self {
        self.default = Some(expr);
        self
    }
}

/// Static description of one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    pub create_sql: &'static str,
}

impl TableDef {
    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

pub const PRACTITIONERS: TableDef = TableDef {
    name: "practitioners",
    columns: &[
        ColumnDef::id(),
        ColumnDef::new("name", ColumnType::Text).not_null(),
        ColumnDef::new("email", ColumnType::Text).not_null().unique(),
        ColumnDef::new("settings", ColumnType::Json),
    ],
    create_sql: CREATE_PRACTITIONERS_TABLE,
};

pub const AVAILABILITY: TableDef = TableDef {
    name: "availability",
    columns: &[
        ColumnDef::id(),
        ColumnDef::new("practitioner_id", ColumnType::Integer)
            .not_null()
            .references("practitioners", "id"),
        ColumnDef::new("slots", ColumnType::Json),
    ],
    create_sql: CREATE_AVAILABILITY_TABLE,
};

pub const BOOKINGS: TableDef = TableDef {
    name: "bookings",
    columns: &[
        ColumnDef::id(),
        ColumnDef::new("practitioner_id", ColumnType::Integer)
            .not_null()
            .references("practitioners", "id"),
        ColumnDef::new("client_info", ColumnType::Text).not_null(),
        ColumnDef::new("status", ColumnType::Text).not_null().default("'pending'"),
        ColumnDef::new("intake_responses", ColumnType::Json),
        ColumnDef::new("created_at", ColumnType::Timestamp)
            .not_null()
            .default("CURRENT_TIMESTAMP"),
    ],
    create_sql: CREATE_BOOKINGS_TABLE,
};

/// All tables in dependency order
pub const ALL_TABLES: &[TableDef] = &[PRACTITIONERS, AVAILABILITY, BOOKINGS];
