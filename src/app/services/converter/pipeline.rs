//! Conversion pipeline from the spectra table to a validated feedstock

use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use super::metadata::MetadataSource;
use super::observer::{ConversionObserver, ProgressObserver, TracingObserver};
use super::preprocess::prepare_table;
use super::record::{RecordIndex, build_record_metadata};
use super::stats::ConversionReport;
use crate::{Error, Result};
use crate::app::services::composition_lookup::{CompositionLookup, FeedstockCompositions};
use crate::app::services::feedstock_validator::{
    FeedstockSink, JsonLinesSink, SubmitOutcome, Validator,
};
use crate::app::services::tab_parser::TabularParser;
use crate::config::Config;
use crate::constants::GDB8_15_HEADERS;

/// Convert a gdb8-15 dataset with the default file layout
///
/// `input_path` is the dataset directory or the spectra file itself. With
/// `verbose` off nothing is written to stdout; rejected records are still
/// logged at warn level.
///
/// # Errors
/// Any fatal condition aborts the run: unreadable or invalid dataset
/// metadata, a missing input or composition feedstock, a table without its
/// first data row, an index outside the composition table, or a failing
/// write. Records already written stay in the feedstock.
pub fn convert(
    input_path: impl AsRef<Path>,
    metadata: MetadataSource,
    verbose: bool,
) -> Result<ConversionReport> {
    let config = Config {
        input_path: input_path.as_ref().to_path_buf(),
        verbose,
        ..Config::default()
    };
    config.validate()?;

    Converter::new(config).run(metadata)
}

/// Converter bound to one validated configuration
#[derive(Debug, Clone)]
pub struct Converter {
    config: Config,
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a full conversion, narrating progress when the config is verbose
    pub fn run(&self, metadata: MetadataSource) -> Result<ConversionReport> {
        if self.config.verbose {
            self.run_observed(metadata, &ProgressObserver::new())
        } else {
            self.run_observed(metadata, &TracingObserver)
        }
    }

    /// Run a full conversion against the configured files
    ///
    /// Metadata is resolved and validated before any data file is read, and the
    /// output is not touched until both input files have been read.
    pub fn run_observed<O>(&self, metadata: MetadataSource, observer: &O) -> Result<ConversionReport>
    where
        O: ConversionObserver + ?Sized,
    {
        let sink = JsonLinesSink::create(&self.config.output_path)?;
        let mut report = self.run_into(metadata, sink, observer)?;
        report.output_path = Some(self.config.output_path.clone());
        Ok(report)
    }

    /// Run a full conversion, writing accepted entries to `sink`
    pub fn run_into<S, O>(
        &self,
        metadata: MetadataSource,
        sink: S,
        observer: &O,
    ) -> Result<ConversionReport>
    where
        S: FeedstockSink,
        O: ConversionObserver + ?Sized,
    {
        let start_time = Instant::now();

        let document = metadata.resolve()?;
        Validator::<S>::check_dataset(&document)?;

        let data_file = self.config.data_file();
        info!("Reading spectra table {}", data_file.display());
        let raw = std::fs::read_to_string(&data_file)
            .map_err(|e| Error::io(format!("Failed to read {}", data_file.display()), e))?;

        let (compositions, load_stats) = FeedstockCompositions::load(
            &self.config.composition_feedstock,
            self.config.composition_offset,
        )?;
        debug!("{}", load_stats.summary());

        // The sink is first written here, once every input has been read
        let validator = Validator::new(document, sink)?;
        let mut report = self.convert_text(&data_file, &raw, &compositions, validator, observer)?;
        report.elapsed = start_time.elapsed();

        Ok(report)
    }

    /// Convert raw spectra text through an already opened validator
    ///
    /// `source` labels the report and diagnostics. The validator is finished
    /// when every line has been processed.
    pub fn convert_text<S, L, O>(
        &self,
        source: &Path,
        raw: &str,
        lookup: &L,
        mut validator: Validator<S>,
        observer: &O,
    ) -> Result<ConversionReport>
    where
        S: FeedstockSink,
        L: CompositionLookup + ?Sized,
        O: ConversionObserver + ?Sized,
    {
        let start_time = Instant::now();
        let table = prepare_table(raw, &self.config.first_row_marker, source)?;

        let parser = TabularParser::new(&table.text, GDB8_15_HEADERS, self.config.separator.clone())
            .with_policy(self.config.column_policy)
            .with_first_line(table.first_line);

        let mut report = ConversionReport::new(validator.dataset().source_name.clone(), source);
        observer.on_start(source, table.data_lines);

        process_records(&parser, lookup, &mut validator, observer, &mut report)?;

        let summary = validator.finish()?;
        debug!(
            "Validator wrote {} of {} submitted records",
            summary.records_accepted, summary.records_submitted
        );

        report.elapsed = start_time.elapsed();
        observer.on_complete(&report);

        Ok(report)
    }
}

/// Enrich, validate, and write every record the parser yields
///
/// Lines that fail to parse and records with an unusable index or invalid
/// metadata are counted in `report` and skipped. A composition lookup
/// failure or a sink failure stops the loop with `Err`.
pub fn process_records<S, L, O>(
    parser: &TabularParser<'_>,
    lookup: &L,
    validator: &mut Validator<S>,
    observer: &O,
    report: &mut ConversionReport,
) -> Result<()>
where
    S: FeedstockSink,
    L: CompositionLookup + ?Sized,
    O: ConversionObserver + ?Sized,
{
    let mut records = parser.records();
    let mut ordinal = 0;
    while let Some(result) = records.next() {
        ordinal += 1;
        report.records_parsed += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_record_level() => {
                let message = e.to_string();
                report.record_parse_failure(message.clone());
                observer.on_record(ordinal, &SubmitOutcome::Rejected { message });
                continue;
            }
            Err(e) => return Err(e),
        };

        let index = match RecordIndex::from_record(&record) {
            Ok(index) => index,
            Err(reason) => {
                let message = format!(
                    "Invalid record on line {}: {}",
                    records.line_number(),
                    reason
                );
                report.record_rejection(message.clone());
                observer.on_record(ordinal, &SubmitOutcome::Rejected { message });
                continue;
            }
        };

        let composition = lookup.composition(index.value)?;
        let metadata = build_record_metadata(&record, &index, composition)?;

        let outcome = validator.submit(&metadata)?;
        match &outcome {
            SubmitOutcome::Accepted { .. } => report.records_accepted += 1,
            SubmitOutcome::Rejected { message } => report.record_rejection(message.clone()),
        }
        observer.on_record(ordinal, &outcome);
    }

    Ok(())
}
