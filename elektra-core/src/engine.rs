use crate::calendar::{Calendar, CalendarConfig, DstTransition};
use crate::conversion::ConversionMatrix;
use crate::models::{
    Block, BlockTable, CreatePricesRequest, Frequency, Iso, MergeRequest, MergedPrices,
    RequiredHour, ScrubPricesRequest, TranslateRequest, VolumeUnit, get_iso_details,
};
use crate::prices::{self, PriceQuery};
use crate::relevance::{self, HourRelevance};
use crate::translate::{self, Contract};
use crate::{ElektraError, InsufficientDataError};
use time::{Date, PrimitiveDateTime};

/// The entry point for boundary callers.
///
/// Owns the calendar (and with it the holiday cache) and the conversion
/// table, and accepts market, block and frequency labels as strings, parsing
/// them before any work is done. Construct one and share it by reference.
#[derive(Debug, Default)]
pub struct Elektra {
    calendar: Calendar,
    matrix: ConversionMatrix,
}

impl Elektra {
    /// An engine over the given calendar and the standard conversion table
    pub fn new(calendar: Calendar) -> Self {
        Self {
            calendar,
            matrix: ConversionMatrix::standard(),
        }
    }

    /// An engine whose calendar is built from configuration
    pub fn from_config(config: &CalendarConfig) -> Result<Self, ElektraError> {
        Ok(Self::new(Calendar::from_config(config)?))
    }

    /// The calendar in use
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// The conversion table in use
    pub fn matrix(&self) -> &ConversionMatrix {
        &self.matrix
    }

    /// Hours of `output` contributed by one unit of `input` at `flow`
    pub fn convert(
        &self,
        flow: PrimitiveDateTime,
        input: &str,
        output: &str,
    ) -> Result<f64, ElektraError> {
        let input = input.parse::<Block>()?;
        let output = output.parse::<Block>()?;
        Ok(self.matrix.convert(&self.calendar, flow, input, output)?)
    }

    /// The per-day volume table for a contract
    pub fn translate_blocks(&self, request: &TranslateRequest) -> Result<BlockTable, ElektraError> {
        let contract = Contract {
            iso: request.iso.parse()?,
            volume: request.volume,
            frequency: request.frequency.parse()?,
            start: request.contract_start,
            block: request.input_block.parse()?,
        };
        let outputs = request
            .output_blocks
            .iter()
            .map(|label| label.parse::<Block>())
            .collect::<Result<Vec<_>, _>>()?;
        let unit = request.output_unit.parse::<VolumeUnit>()?;

        Ok(translate::translate_blocks(
            &self.calendar,
            &self.matrix,
            &contract,
            &outputs,
            unit,
        )?)
    }

    /// The hour-weighted blend of each month's two block prices
    pub fn merge_block_prices(
        &self,
        request: &MergeRequest,
    ) -> Result<Vec<MergedPrices>, ElektraError> {
        let iso = request.iso.parse::<Iso>()?;
        let output_block = request.output_block.parse::<Block>()?;
        Ok(translate::merge_block_prices(
            &self.calendar,
            &self.matrix,
            iso,
            output_block,
            &request.rows,
        )?)
    }

    /// The block price for a day or month of an hourly feed.
    ///
    /// An empty feed is rejected before the labels are looked at.
    pub fn create_prices(&self, request: &CreatePricesRequest) -> Result<f64, ElektraError> {
        if request.data.is_empty() {
            return Err(InsufficientDataError::EmptyInput.into());
        }

        let query = PriceQuery {
            flow_date: request.flow_date,
            ticker: &request.ticker,
            node: &request.node,
            iso: request.iso.parse()?,
            block: request.block.parse()?,
            frequency: request.frequency.parse::<Frequency>()?,
        };
        prices::create_prices(&self.calendar, &query, &request.data)
    }

    /// The filled hourly schedule for one day of a feed
    pub fn scrub_hourly_prices(
        &self,
        request: &ScrubPricesRequest,
    ) -> Result<Vec<RequiredHour>, ElektraError> {
        if request.data.is_empty() {
            return Err(InsufficientDataError::EmptyInput.into());
        }

        prices::scrub_hourly_prices(
            &self.calendar,
            request.flow_date,
            &request.ticker,
            &request.node,
            request.iso.parse()?,
            &request.data,
        )
    }

    /// See [`Calendar::is_dst_transition`]
    pub fn is_dst_transition(&self, date: Date) -> DstTransition {
        self.calendar.is_dst_transition(date)
    }

    /// See [`relevance::is_relevant_day`]
    pub fn is_relevant_day(&self, block: &str, iso: &str, date: Date) -> Result<bool, ElektraError> {
        Ok(relevance::is_relevant_day(
            &self.calendar,
            block.parse()?,
            iso.parse()?,
            date,
        ))
    }

    /// See [`relevance::is_relevant_hour`]
    pub fn is_relevant_hour(
        &self,
        block: &str,
        iso: &str,
        hour_ending: u8,
        date: Date,
    ) -> Result<HourRelevance, ElektraError> {
        Ok(relevance::is_relevant_hour(
            &self.calendar,
            block.parse()?,
            iso.parse()?,
            hour_ending,
            date,
        )?)
    }

    /// The first and last peak hour-endings of a market
    pub fn get_iso_details(&self, iso: &str) -> Result<(u8, u8), ElektraError> {
        Ok(get_iso_details(iso.parse()?)?)
    }

    /// See [`relevance::get_required_hours`]
    pub fn get_required_hours(&self, block: &str, date: Date) -> Result<f64, ElektraError> {
        Ok(relevance::get_required_hours(
            &self.calendar,
            block.parse()?,
            date,
        )?)
    }
}
