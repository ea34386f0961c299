//! Synthetic bronze sample data.
//!
//! A run fabricates four related tables in dependency order and writes each
//! one to `<bronze_root>/<table>/ingestion_date=<today>/data.parquet`:
//!
//! 1. users, with account ids drawn from a small range
//! 2. events, referencing the user id range
//! 3. subscriptions, one per account observed on users
//! 4. invoices, a 30-day walk over each subscription's lifetime
//!
//! Any failure aborts the run; partitions already written stay on disk.

pub mod billing;
pub mod events;
pub mod users;

pub use billing::{add_months_approx, generate_invoices, generate_subscriptions, invoice_count};
pub use events::generate_events;
pub use users::generate_users;

use chrono::{DateTime, NaiveDate, Utc};
use lh_bronze::{BronzeLayout, BronzeWriter, WriteError, WrittenPartition};
use lh_common::{Event, Invoice, Subscription, User};
use lh_config::GeneratorConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Knobs that shape the generated data.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    pub users: usize,
    pub events: usize,
    pub max_account_id: i64,
    pub churn_probability: f64,
}

impl From<&GeneratorConfig> for GeneratorSettings {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            users: config.users,
            events: config.events,
            max_account_id: config.max_account_id,
            churn_probability: config.churn_probability,
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::from(&GeneratorConfig::default())
    }
}

/// The four bronze tables of one run, held in memory until written.
#[derive(Debug, Clone, Default)]
pub struct SampleDataset {
    pub users: Vec<User>,
    pub events: Vec<Event>,
    pub subscriptions: Vec<Subscription>,
    pub invoices: Vec<Invoice>,
}

/// Seeded generator bound to one generation instant.
pub struct SampleGenerator {
    rng: StdRng,
    seed: u64,
    now: DateTime<Utc>,
    settings: GeneratorSettings,
}

impl SampleGenerator {
    /// Without a seed, one is drawn from the thread RNG.
    pub fn new(settings: GeneratorSettings, seed: Option<u64>, now: DateTime<Utc>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            now,
            settings,
        }
    }

    /// Seed in use; pass it back to reproduce a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Calendar day of the generation instant (UTC).
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn generate(&mut self) -> SampleDataset {
        let today = self.today();
        let users = generate_users(
            &mut self.rng,
            self.settings.users,
            self.settings.max_account_id,
            self.now,
        );
        let events = generate_events(
            &mut self.rng,
            self.settings.events,
            self.settings.users as i64,
            self.now,
        );
        let subscriptions = generate_subscriptions(
            &mut self.rng,
            users.iter().map(|u| u.account_id),
            today,
            self.settings.churn_probability,
        );
        let invoices = generate_invoices(&mut self.rng, &subscriptions, today);

        debug!(
            users = users.len(),
            events = events.len(),
            subscriptions = subscriptions.len(),
            invoices = invoices.len(),
            "generated sample dataset"
        );

        SampleDataset {
            users,
            events,
            subscriptions,
            invoices,
        }
    }
}

/// Outcome of a generator run.
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    pub seed: u64,
    pub ingestion_date: NaiveDate,
    pub partitions: Vec<WrittenPartition>,
}

impl GenerateSummary {
    pub fn rows(&self, dataset: &str) -> Option<usize> {
        self.partitions
            .iter()
            .find(|p| p.dataset == dataset)
            .map(|p| p.rows)
    }
}

/// Write every table of `dataset` through `writer`, users first.
pub fn write_dataset(
    writer: &BronzeWriter,
    dataset: &SampleDataset,
) -> Result<Vec<WrittenPartition>, WriteError> {
    Ok(vec![
        writer.write_records(&dataset.users)?,
        writer.write_records(&dataset.events)?,
        writer.write_records(&dataset.subscriptions)?,
        writer.write_records(&dataset.invoices)?,
    ])
}

/// Generate a dataset at `now` and persist it under the configured bronze root.
pub fn run_generate_at(
    config: &GeneratorConfig,
    now: DateTime<Utc>,
) -> Result<GenerateSummary, WriteError> {
    let mut generator = SampleGenerator::new(GeneratorSettings::from(config), config.seed, now);
    info!(
        seed = generator.seed(),
        users = config.users,
        events = config.events,
        root = %config.bronze_path.display(),
        "generating bronze sample data"
    );

    let dataset = generator.generate();
    let writer = BronzeWriter::new(BronzeLayout::new(&config.bronze_path), generator.today());
    let partitions = write_dataset(&writer, &dataset)?;

    Ok(GenerateSummary {
        seed: generator.seed(),
        ingestion_date: writer.ingestion_date(),
        partitions,
    })
}

/// [`run_generate_at`] with the current time.
pub fn run_generate(config: &GeneratorConfig) -> Result<GenerateSummary, WriteError> {
    run_generate_at(config, Utc::now())
}
