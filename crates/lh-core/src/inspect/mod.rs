//! DuckDB inventory report.
//!
//! Lists every user-visible table and view and counts the rows in each.
//! Opening the database or reading its catalog is fatal. A failed count is
//! not: the object is reported with the error class in place of a count and
//! the report moves on to the next object.

mod catalog;

pub use catalog::{error_class, DuckDbCatalog, CATALOG_QUERY};

use std::io::Write;
use std::path::{Path, PathBuf};

use lh_common::output::write_json as write_json_document;
use lh_common::OutputFormat;
use lh_config::InspectorConfig;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Fatal inspector errors.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("cannot open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: duckdb::Error,
    },

    #[error("catalog query failed: {0}")]
    Catalog(#[source] duckdb::Error),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write report: {0}")]
    Output(#[from] lh_common::Error),
}

/// A table or view as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogObject {
    pub schema: String,
    /// `BASE TABLE`, `VIEW`, `LOCAL TEMPORARY`, ...
    pub kind: String,
    pub name: String,
}

impl CatalogObject {
    pub fn new(schema: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// `"schema"."name"`, safe to splice into SQL.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", safe_ident(&self.schema), safe_ident(&self.name))
    }
}

/// Quote an SQL identifier, doubling any embedded double quotes.
pub fn safe_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// A count that could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{class}: {message}")]
pub struct CountError {
    /// Short category name, e.g. `CatalogError`.
    pub class: String,
    pub message: String,
}

/// Read access to a database catalog.
pub trait Catalog {
    /// All user-visible tables and views, ordered by schema, kind, name.
    fn list_objects(&self) -> Result<Vec<CatalogObject>, InspectError>;

    fn count_rows(&self, object: &CatalogObject) -> Result<u64, CountError>;
}

/// Row count column of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowCount {
    Counted(u64),
    Failed(CountError),
    /// Counting was disabled.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectReport {
    pub object: CatalogObject,
    pub rows: RowCount,
}

impl ObjectReport {
    /// `schema<TAB>kind<TAB>name[<TAB>rows=<count-or-error>]`
    pub fn to_line(&self) -> String {
        let o = &self.object;
        match &self.rows {
            RowCount::Counted(n) => format!("{}\t{}\t{}\trows={}", o.schema, o.kind, o.name, n),
            RowCount::Failed(err) => {
                format!("{}\t{}\t{}\trows={}", o.schema, o.kind, o.name, err.class)
            }
            RowCount::Skipped => format!("{}\t{}\t{}", o.schema, o.kind, o.name),
        }
    }
}

/// Inventory of one database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub database: PathBuf,
    pub objects: Vec<ObjectReport>,
}

impl InspectReport {
    pub fn failed_counts(&self) -> usize {
        self.objects
            .iter()
            .filter(|o| matches!(o.rows, RowCount::Failed(_)))
            .count()
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<(), InspectError> {
        writeln!(out, "DuckDB file: {}", self.database.display())?;
        for object in &self.objects {
            writeln!(out, "{}", object.to_line())?;
        }
        Ok(())
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<(), InspectError> {
        #[derive(Serialize)]
        struct JsonObject<'a> {
            schema: &'a str,
            kind: &'a str,
            name: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            rows: Option<u64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            error: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            message: Option<&'a str>,
        }

        #[derive(Serialize)]
        struct JsonReport<'a> {
            database: String,
            objects: Vec<JsonObject<'a>>,
        }

        let objects = self
            .objects
            .iter()
            .map(|o| {
                let (rows, error, message) = match &o.rows {
                    RowCount::Counted(n) => (Some(*n), None, None),
                    RowCount::Failed(e) => (None, Some(e.class.as_str()), Some(e.message.as_str())),
                    RowCount::Skipped => (None, None, None),
                };
                JsonObject {
                    schema: &o.object.schema,
                    kind: &o.object.kind,
                    name: &o.object.name,
                    rows,
                    error,
                    message,
                }
            })
            .collect();

        let report = JsonReport {
            database: self.database.display().to_string(),
            objects,
        };
        write_json_document(out, &report)?;
        Ok(())
    }

    pub fn write<W: Write>(&self, format: OutputFormat, out: &mut W) -> Result<(), InspectError> {
        match format {
            OutputFormat::Text => self.write_text(out),
            OutputFormat::Json => self.write_json(out),
        }
    }
}

/// Build the report for `catalog`.
///
/// Only listing errors are returned; count failures are recorded per object.
pub fn inspect_catalog<C: Catalog + ?Sized>(
    catalog: &C,
    database: &Path,
    count_rows: bool,
) -> Result<InspectReport, InspectError> {
    let objects = catalog.list_objects()?;
    info!(objects = objects.len(), "listed catalog objects");

    let objects = objects
        .into_iter()
        .map(|object| {
            let rows = if !count_rows {
                RowCount::Skipped
            } else {
                match catalog.count_rows(&object) {
                    Ok(n) => RowCount::Counted(n),
                    Err(err) => {
                        warn!(
                            object = %object.qualified_name(),
                            class = %err.class,
                            error = %err.message,
                            "row count failed"
                        );
                        RowCount::Failed(err)
                    }
                }
            };
            ObjectReport { object, rows }
        })
        .collect();

    Ok(InspectReport {
        database: database.to_path_buf(),
        objects,
    })
}

/// Open the configured database read-only, build the report, and write it to `out`.
pub fn run_inspect<W: Write>(
    config: &InspectorConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<InspectReport, InspectError> {
    let catalog = DuckDbCatalog::open_read_only(&config.duckdb_path)?;
    let report = inspect_catalog(&catalog, &config.duckdb_path, config.count_rows)?;
    report.write(format, out)?;
    out.flush()?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// In-memory catalog whose counts can be scripted to fail.
    struct FakeCatalog {
        objects: Vec<CatalogObject>,
        failing: Vec<&'static str>,
        counted: RefCell<Vec<String>>,
    }

    impl FakeCatalog {
        fn new(objects: Vec<CatalogObject>, failing: Vec<&'static str>) -> Self {
            Self {
                objects,
                failing,
                counted: RefCell::new(Vec::new()),
            }
        }
    }

    impl Catalog for FakeCatalog {
        fn list_objects(&self) -> Result<Vec<CatalogObject>, InspectError> {
            Ok(self.objects.clone())
        }

        fn count_rows(&self, object: &CatalogObject) -> Result<u64, CountError> {
            self.counted.borrow_mut().push(object.name.clone());
            if self.failing.iter().any(|f| *f == object.name) {
                return Err(CountError {
                    class: "PermissionError".to_string(),
                    message: format!("access to {} denied", object.name),
                });
            }
            Ok(object.name.len() as u64)
        }
    }

    fn render(report: &InspectReport) -> String {
        let mut buf = Vec::new();
        report.write_text(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_safe_ident_plain() {
        assert_eq!(safe_ident("users"), "\"users\"");
    }

    #[test]
    fn test_safe_ident_doubles_quotes() {
        assert_eq!(safe_ident("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(safe_ident("\"\""), "\"\"\"\"\"\"");
    }

    #[test]
    fn test_qualified_name() {
        let object = CatalogObject::new("main", "BASE TABLE", "a\"b");
        assert_eq!(object.qualified_name(), "\"main\".\"a\"\"b\"");
    }

    #[test]
    fn test_empty_catalog_prints_header_only() {
        let catalog = FakeCatalog::new(vec![], vec![]);
        let report = inspect_catalog(&catalog, Path::new("/tmp/empty.duckdb"), true).unwrap();
        assert_eq!(render(&report), "DuckDB file: /tmp/empty.duckdb\n");
    }

    #[test]
    fn test_failed_count_is_reported_inline_and_report_continues() {
        let catalog = FakeCatalog::new(
            vec![
                CatalogObject::new("main", "BASE TABLE", "locked"),
                CatalogObject::new("main", "BASE TABLE", "users"),
                CatalogObject::new("main", "VIEW", "v_users"),
            ],
            vec!["locked"],
        );
        let report = inspect_catalog(&catalog, Path::new("db.duckdb"), true).unwrap();

        assert_eq!(report.failed_counts(), 1);
        assert_eq!(
            render(&report),
            "DuckDB file: db.duckdb\n\
             main\tBASE TABLE\tlocked\trows=PermissionError\n\
             main\tBASE TABLE\tusers\trows=5\n\
             main\tVIEW\tv_users\trows=7\n"
        );
        assert_eq!(*catalog.counted.borrow(), vec!["locked", "users", "v_users"]);
    }

    #[test]
    fn test_skipped_counts_issue_no_queries() {
        let catalog = FakeCatalog::new(vec![CatalogObject::new("main", "VIEW", "v")], vec![]);
        let report = inspect_catalog(&catalog, Path::new("db.duckdb"), false).unwrap();

        assert!(catalog.counted.borrow().is_empty());
        assert_eq!(render(&report), "DuckDB file: db.duckdb\nmain\tVIEW\tv\n");
    }

    #[test]
    fn test_json_report_shape() {
        let catalog = FakeCatalog::new(
            vec![
                CatalogObject::new("main", "BASE TABLE", "bad"),
                CatalogObject::new("main", "BASE TABLE", "good"),
            ],
            vec!["bad"],
        );
        let report = inspect_catalog(&catalog, Path::new("db.duckdb"), true).unwrap();
        let mut buf = Vec::new();
        report.write(OutputFormat::Json, &mut buf).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["database"], "db.duckdb");
        assert_eq!(json["objects"][0]["error"], "PermissionError");
        assert!(json["objects"][0].get("rows").is_none());
        assert_eq!(json["objects"][1]["rows"], 4);
    }
}
