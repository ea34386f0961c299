//! Arrow schema definitions for bronze tables.
//!
//! Timestamps are stored as microseconds in UTC, calendar dates as `Date32`.
//! Column names match the entity field names one to one.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, Date32Array, Float64Array, Int64Array, StringArray, TimestampMicrosecondArray,
};
use arrow::datatypes::{DataType, Date32Type, Field, Schema, SchemaRef, TimeUnit};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use lh_common::{Event, Invoice, Subscription, User};

/// Bronze table names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableName {
    Users,
    Events,
    Subscriptions,
    Invoices,
}

impl TableName {
    pub const ALL: [TableName; 4] = [
        TableName::Users,
        TableName::Events,
        TableName::Subscriptions,
        TableName::Invoices,
    ];

    /// Directory name of the dataset under the bronze root.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Users => "users",
            TableName::Events => "events",
            TableName::Subscriptions => "subscriptions",
            TableName::Invoices => "invoices",
        }
    }

    pub fn schema(&self) -> SchemaRef {
        match self {
            TableName::Users => users_schema(),
            TableName::Events => events_schema(),
            TableName::Subscriptions => subscriptions_schema(),
            TableName::Invoices => invoices_schema(),
        }
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn utc_timestamp() -> DataType {
    DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))
}

pub fn users_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("user_id", DataType::Int64, false),
        Field::new("account_id", DataType::Int64, false),
        Field::new("email", DataType::Utf8, false),
        Field::new("created_at", utc_timestamp(), false),
        Field::new("updated_at", utc_timestamp(), false),
    ]))
}

pub fn events_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("event_id", DataType::Int64, false),
        Field::new("user_id", DataType::Int64, false),
        Field::new("event_type", DataType::Utf8, false),
        Field::new("event_ts", utc_timestamp(), false),
    ]))
}

pub fn subscriptions_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("subscription_id", DataType::Utf8, false),
        Field::new("account_id", DataType::Int64, false),
        Field::new("plan", DataType::Utf8, false),
        Field::new("start_date", DataType::Date32, false),
        Field::new("end_date", DataType::Date32, true),
        Field::new("monthly_price", DataType::Float64, false),
    ]))
}

pub fn invoices_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("invoice_id", DataType::Utf8, false),
        Field::new("account_id", DataType::Int64, false),
        Field::new("subscription_id", DataType::Utf8, false),
        Field::new("invoice_date", DataType::Date32, false),
        Field::new("amount", DataType::Float64, false),
        Field::new("status", DataType::Utf8, false),
    ]))
}

/// A record type that maps onto one bronze table.
pub trait BronzeRecord: Sized {
    const TABLE: TableName;

    /// Build a columnar batch from rows, in row order.
    fn to_record_batch(rows: &[Self]) -> Result<RecordBatch, ArrowError>;
}

fn timestamps<'a>(values: impl Iterator<Item = &'a DateTime<Utc>>) -> ArrayRef {
    let micros: Vec<i64> = values.map(|ts| ts.timestamp_micros()).collect();
    Arc::new(TimestampMicrosecondArray::from(micros).with_timezone("UTC"))
}

impl BronzeRecord for User {
    const TABLE: TableName = TableName::Users;

    fn to_record_batch(rows: &[Self]) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|u| u.user_id.0))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|u| u.account_id.0))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|u| u.email.as_str()))),
            timestamps(rows.iter().map(|u| &u.created_at)),
            timestamps(rows.iter().map(|u| &u.updated_at)),
        ];
        RecordBatch::try_new(users_schema(), columns)
    }
}

impl BronzeRecord for Event {
    const TABLE: TableName = TableName::Events;

    fn to_record_batch(rows: &[Self]) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|e| e.event_id.0))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|e| e.user_id.0))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|e| e.event_type.as_str()),
            )),
            timestamps(rows.iter().map(|e| &e.event_ts)),
        ];
        RecordBatch::try_new(events_schema(), columns)
    }
}

impl BronzeRecord for Subscription {
    const TABLE: TableName = TableName::Subscriptions;

    fn to_record_batch(rows: &[Self]) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|s| s.subscription_id.to_string()),
            )),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|s| s.account_id.0))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|s| s.plan.as_str()))),
            Arc::new(Date32Array::from_iter_values(
                rows.iter().map(|s| Date32Type::from_naive_date(s.start_date)),
            )),
            Arc::new(Date32Array::from_iter(
                rows.iter()
                    .map(|s| s.end_date.map(Date32Type::from_naive_date)),
            )),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|s| s.monthly_price))),
        ];
        RecordBatch::try_new(subscriptions_schema(), columns)
    }
}

impl BronzeRecord for Invoice {
    const TABLE: TableName = TableName::Invoices;

    fn to_record_batch(rows: &[Self]) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|i| i.invoice_id.to_string()),
            )),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|i| i.account_id.0))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|i| i.subscription_id.to_string()),
            )),
            Arc::new(Date32Array::from_iter_values(
                rows.iter().map(|i| Date32Type::from_naive_date(i.invoice_date)),
            )),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|i| i.amount))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|i| i.status.as_str()))),
        ];
        RecordBatch::try_new(invoices_schema(), columns)
    }
}
