//! SQLite product store.

use std::path::Path;
use std::str::FromStr;

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::Product;

use super::repository::ProductRepository;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS produtos (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    codigo          INTEGER NOT NULL,
    nome            TEXT    NOT NULL,
    unidade_medida  TEXT    NOT NULL DEFAULT 'UN',
    quantidade      INTEGER NOT NULL DEFAULT 0 CHECK (quantidade >= 0),
    valor_unitario  TEXT    NOT NULL DEFAULT '0',
    data_fabricacao TEXT    NOT NULL DEFAULT '',
    fornecedor      TEXT    NOT NULL DEFAULT '',
    local_armazem   TEXT    NOT NULL DEFAULT ''
);
CREATE INDEX IF NOT EXISTS idx_produtos_codigo ON produtos (codigo);
CREATE INDEX IF NOT EXISTS idx_produtos_nome ON produtos (nome);
";

const COLUMNS: &str = "id, codigo, nome, unidade_medida, quantidade, valor_unitario, \
                       data_fabricacao, fornecedor, local_armazem";

/// A [`ProductRepository`] backed by rusqlite (bundled SQLite).
///
/// The first write after a commit opens a transaction; [`commit`] or
/// [`rollback`] closes it. Unit prices are stored as text so no decimal
/// precision is lost.
///
/// [`commit`]: ProductRepository::commit
/// [`rollback`]: ProductRepository::rollback
pub struct SqliteProductRepository {
    conn: Connection,
}

impl SqliteProductRepository {
    /// Opens or creates a SQLite database at the given path.
    pub fn open(path: &Path) -> EngineResult<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Creates an in-memory SQLite database.
    pub fn open_in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    /// Opens the database a url points to.
    ///
    /// Accepts `sqlite::memory:`, `sqlite://<path>`, `sqlite:<path>` and bare
    /// paths. Any other scheme is rejected.
    pub fn connect(url: &str) -> EngineResult<Self> {
        if url == "sqlite::memory:" || url == ":memory:" {
            return Self::open_in_memory();
        }

        let path = if let Some(rest) = url.strip_prefix("sqlite://") {
            rest
        } else if let Some(rest) = url.strip_prefix("sqlite:") {
            rest
        } else if url.contains("://") {
            return Err(EngineError::Storage {
                message: format!("unsupported database url: {url}"),
            });
        } else {
            url
        };

        tracing::debug!(path, "Opening SQLite product store");
        Self::open(Path::new(path))
    }

    fn with_connection(conn: Connection) -> EngineResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn begin_if_needed(&self) -> EngineResult<()> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN")?;
        }
        Ok(())
    }

    fn query_one(&self, filter: &str, param: &dyn rusqlite::ToSql) -> EngineResult<Option<Product>> {
        let sql = format!("SELECT {COLUMNS} FROM produtos WHERE {filter} ORDER BY id LIMIT 1");
        let product = self
            .conn
            .query_row(&sql, &[param][..], product_from_row)
            .optional()?;
        Ok(product)
    }
}

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    let price: String = row.get(5)?;
    let unit_price = Decimal::from_str(&price)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Product {
        id: Some(row.get(0)?),
        code: row.get(1)?,
        name: row.get(2)?,
        unit_of_measure: row.get(3)?,
        quantity: row.get(4)?,
        unit_price,
        manufacture_date: row.get(6)?,
        supplier: row.get(7)?,
        location: row.get(8)?,
    })
}

impl ProductRepository for SqliteProductRepository {
    fn find_by_code(&self, code: i64) -> EngineResult<Option<Product>> {
        self.query_one("codigo = ?1", &code)
    }

    fn find_by_name_ci(&self, name: &str) -> EngineResult<Option<Product>> {
        self.query_one("LOWER(nome) = LOWER(?1)", &name)
    }

    fn insert(&mut self, mut product: Product) -> EngineResult<Product> {
        self.begin_if_needed()?;
        self.conn.execute(
            "INSERT INTO produtos (codigo, nome, unidade_medida, quantidade, valor_unitario, \
             data_fabricacao, fornecedor, local_armazem) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                product.code,
                product.name,
                product.unit_of_measure,
                product.quantity,
                product.unit_price.to_string(),
                product.manufacture_date,
                product.supplier,
                product.location,
            ],
        )?;
        product.id = Some(self.conn.last_insert_rowid());
        Ok(product)
    }

    fn update(&mut self, product: &Product) -> EngineResult<()> {
        let id = product.id.ok_or_else(|| EngineError::Storage {
            message: format!("product {} has no id", product.code),
        })?;

        self.begin_if_needed()?;
        let affected = self.conn.execute(
            "UPDATE produtos SET codigo = ?1, nome = ?2, unidade_medida = ?3, quantidade = ?4, \
             valor_unitario = ?5, data_fabricacao = ?6, fornecedor = ?7, local_armazem = ?8 \
             WHERE id = ?9",
            params![
                product.code,
                product.name,
                product.unit_of_measure,
                product.quantity,
                product.unit_price.to_string(),
                product.manufacture_date,
                product.supplier,
                product.location,
                id,
            ],
        )?;

        if affected == 0 {
            return Err(EngineError::Storage {
                message: format!("product id {id} does not exist"),
            });
        }
        Ok(())
    }

    fn commit(&mut self) -> EngineResult<()> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }

    fn rollback(&mut self) -> EngineResult<()> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("ROLLBACK")?;
        }
        Ok(())
    }

    fn list(&self) -> EngineResult<Vec<Product>> {
        let sql = format!("SELECT {COLUMNS} FROM produtos ORDER BY codigo, id");
        let mut stmt = self.conn.prepare(&sql)?;
        let products = stmt
            .query_map([], product_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(products)
    }
}
