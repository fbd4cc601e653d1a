//! CSV market data provider.
//!
//! Reads candles from a CSV file with a header row containing at least
//! `close` and `volume` columns (extra columns such as a timestamp are
//! ignored). Rows are chronological, oldest first. The file's own candle
//! granularity is used for every timeframe.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use signalforge_core::collaborators::{DataError, MarketDataProvider};
use signalforge_core::domain::Timeframe;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CandleRow {
    close: Decimal,
    volume: Decimal,
}

#[derive(Debug, Clone)]
pub struct CsvProvider {
    source: PathBuf,
    closes: Vec<Decimal>,
    volumes: Vec<Decimal>,
}

impl CsvProvider {
    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataError::Other(format!("open {}: {e}", path.display())))?;
        let provider = Self::from_reader(reader, path.to_path_buf())?;
        debug!(path = %path.display(), candles = provider.len(), "csv candles loaded");
        Ok(provider)
    }

    /// Parse candles from in-memory CSV text.
    pub fn from_csv_str(text: &str) -> Result<Self, DataError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());
        Self::from_reader(reader, PathBuf::from("<memory>"))
    }

    fn from_reader<R: std::io::Read>(
        mut reader: csv::Reader<R>,
        source: PathBuf,
    ) -> Result<Self, DataError> {
        let mut closes = Vec::new();
        let mut volumes = Vec::new();
        for (index, row) in reader.deserialize::<CandleRow>().enumerate() {
            let row = row.map_err(|e| {
                DataError::ResponseFormatChanged(format!(
                    "{} row {}: {e}",
                    source.display(),
                    index + 1
                ))
            })?;
            closes.push(row.close);
            volumes.push(row.volume);
        }
        Ok(Self {
            source,
            closes,
            volumes,
        })
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    fn last_n(&self, series: &[Decimal], limit: usize) -> Result<Vec<Decimal>, DataError> {
        if series.len() < limit {
            return Err(DataError::ShortSeries {
                requested: limit,
                returned: series.len(),
            });
        }
        Ok(series[series.len() - limit..].to_vec())
    }
}

impl MarketDataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn current_price(&self, _symbol: &str) -> Result<Decimal, DataError> {
        self.closes
            .last()
            .copied()
            .ok_or_else(|| DataError::Other(format!("{} has no candles", self.source.display())))
    }

    fn historical_closes(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Decimal>, DataError> {
        self.last_n(&self.closes, limit)
    }

    fn volumes(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Decimal>, DataError> {
        self.last_n(&self.volumes, limit)
    }

    fn is_available(&self) -> bool {
        !self.is_empty()
    }
}
