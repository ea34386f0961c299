//! DuckDB-backed catalog.

use std::fmt::Debug;
use std::path::Path;

use duckdb::{AccessMode, Config, Connection};
use tracing::debug;

use super::{Catalog, CatalogObject, CountError, InspectError};

/// User-visible tables and views of the attached database file.
pub const CATALOG_QUERY: &str = "\
    select table_schema, table_type, table_name \
    from information_schema.tables \
    where table_schema not in ('information_schema', 'pg_catalog') \
      and table_catalog = current_database() \
    order by table_schema, table_type, table_name";

/// One DuckDB connection, used sequentially for the whole report.
pub struct DuckDbCatalog {
    conn: Connection,
}

impl DuckDbCatalog {
    /// Open an existing database file without write access.
    ///
    /// A missing or malformed file is an error; nothing is created.
    pub fn open_read_only(path: &Path) -> Result<Self, InspectError> {
        let open_error = |source| InspectError::Open {
            path: path.to_path_buf(),
            source,
        };
        let config = Config::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(open_error)?;
        let conn = Connection::open_with_flags(path, config).map_err(open_error)?;
        debug!(path = %path.display(), "opened database read-only");
        Ok(Self { conn })
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl Catalog for DuckDbCatalog {
    fn list_objects(&self) -> Result<Vec<CatalogObject>, InspectError> {
        let mut stmt = self.conn.prepare(CATALOG_QUERY).map_err(InspectError::Catalog)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CatalogObject {
                    schema: row.get(0)?,
                    kind: row.get(1)?,
                    name: row.get(2)?,
                })
            })
            .map_err(InspectError::Catalog)?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(InspectError::Catalog)
    }

    fn count_rows(&self, object: &CatalogObject) -> Result<u64, CountError> {
        let sql = format!("select count(*) from {}", object.qualified_name());
        self.conn
            .query_row(&sql, [], |row| row.get::<_, i64>(0))
            .map(|n| n.max(0) as u64)
            .map_err(|err| CountError {
                class: error_class(&err),
                message: err.to_string(),
            })
    }
}

/// Short category name for a DuckDB error.
///
/// Engine failures carry messages like `Catalog Error: Table ... does not
/// exist`; the prefix becomes `CatalogError`. Anything else falls back to
/// the error variant's name.
pub fn error_class(err: &duckdb::Error) -> String {
    if let duckdb::Error::DuckDBFailure(_, Some(message)) = err {
        if let Some(class) = engine_error_class(message) {
            return class;
        }
    }
    variant_name(err)
}

fn engine_error_class(message: &str) -> Option<String> {
    let (prefix, _) = message.split_once(':')?;
    let prefix = prefix.trim();
    let is_class = prefix.ends_with("Error")
        && prefix.chars().all(|c| c.is_ascii_alphabetic() || c == ' ');
    is_class.then(|| prefix.split_whitespace().collect())
}

fn variant_name<T: Debug>(value: &T) -> String {
    let debug = format!("{:?}", value);
    debug
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("Error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_class() {
        assert_eq!(
            engine_error_class("Catalog Error: Table with name x does not exist!").as_deref(),
            Some("CatalogError")
        );
        assert_eq!(
            engine_error_class("Invalid Input Error: boom").as_deref(),
            Some("InvalidInputError")
        );
        assert_eq!(engine_error_class("no class here"), None);
        assert_eq!(engine_error_class("Something: else"), None);
    }

    #[test]
    fn test_non_engine_errors_use_variant_name() {
        let err = duckdb::Error::QueryReturnedNoRows;
        assert_eq!(error_class(&err), "QueryReturnedNoRows");

        let err = duckdb::Error::InvalidColumnIndex(3);
        assert_eq!(error_class(&err), "InvalidColumnIndex");
    }

    #[test]
    fn test_in_memory_catalog_lists_and_counts() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "create table users(id integer);
             insert into users values (1), (2), (3);
             create view v_users as select * from users;",
        )
        .unwrap();
        let catalog = DuckDbCatalog::from_connection(conn);

        let objects = catalog.list_objects().unwrap();
        assert_eq!(
            objects,
            vec![
                CatalogObject::new("main", "BASE TABLE", "users"),
                CatalogObject::new("main", "VIEW", "v_users"),
            ]
        );
        assert_eq!(catalog.count_rows(&objects[0]), Ok(3));
        assert_eq!(catalog.count_rows(&objects[1]), Ok(3));
    }

    #[test]
    fn test_quoted_names_are_counted() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"create table "odd ""name"""(id integer);
               insert into "odd ""name""" values (1), (2);"#,
        )
        .unwrap();
        let catalog = DuckDbCatalog::from_connection(conn);

        let objects = catalog.list_objects().unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "odd \"name\"");
        assert_eq!(catalog.count_rows(&objects[0]), Ok(2));
    }

    #[test]
    fn test_missing_object_count_fails_with_class() {
        let conn = Connection::open_in_memory().unwrap();
        let catalog = DuckDbCatalog::from_connection(conn);
        let ghost = CatalogObject::new("main", "BASE TABLE", "ghost");

        let err = catalog.count_rows(&ghost).unwrap_err();
        assert_eq!(err.class, "CatalogError");
        assert!(err.message.contains("ghost"));
    }
}
