//! Contract volumes and prices re-expressed in other blocks.

use crate::ConfigurationError;
use crate::calendar::{Calendar, first_hour_of_day};
use crate::conversion::ConversionMatrix;
use crate::models::{Block, BlockPrices, BlockRow, BlockTable, Frequency, Iso, Map, MergedPrices, VolumeUnit};
use time::Date;
use tracing::{Level, event};

/// A volume of one block over a contract period.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contract {
    /// The market the contract settles in
    pub iso: Iso,
    /// The contract volume, in MW
    pub volume: f64,
    /// Daily contracts cover `start` alone; monthly ones run to the end of its month
    pub frequency: Frequency,
    /// The first flow date
    pub start: Date,
    /// The block the volume is written in
    pub block: Block,
}

/// One row per day of the contract, one column per output block.
///
/// With [`VolumeUnit::Mwh`] a cell holds the volume times the hours the
/// conversion yields; with [`VolumeUnit::Mw`] any day with hours in the
/// output block carries the flat volume.
pub fn translate_blocks(
    calendar: &Calendar,
    matrix: &ConversionMatrix,
    contract: &Contract,
    outputs: &[Block],
    unit: VolumeUnit,
) -> Result<BlockTable, ConfigurationError> {
    let rows = contract
        .frequency
        .day_range(contract.start)
        .map(|date| -> Result<BlockRow, ConfigurationError> {
            let volumes = outputs
                .iter()
                .map(|&output| -> Result<(Block, f64), ConfigurationError> {
                    let hours =
                        matrix.convert(calendar, first_hour_of_day(date), contract.block, output)?;
                    let factor = match unit {
                        VolumeUnit::Mw if hours != 0.0 => 1.0,
                        VolumeUnit::Mw | VolumeUnit::Mwh => hours,
                    };
                    let value = factor * contract.volume;
                    event!(
                        Level::DEBUG,
                        %date,
                        input = %contract.block,
                        %output,
                        hours,
                        value,
                        "translated volume"
                    );
                    Ok((output, value))
                })
                .collect::<Result<Map<Block>, _>>()?;
            Ok(BlockRow { date, volumes })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BlockTable(rows))
}

/// Blends each month's two block prices into one, weighted by block hours.
///
/// The hours come from translating a unit 7x24 volume over the month.
/// `output_block` names what the blend represents; it does not change the
/// weighting.
pub fn merge_block_prices(
    calendar: &Calendar,
    matrix: &ConversionMatrix,
    iso: Iso,
    output_block: Block,
    rows: &[BlockPrices],
) -> Result<Vec<MergedPrices>, ConfigurationError> {
    rows.iter()
        .map(|row| -> Result<MergedPrices, ConfigurationError> {
            let (blocks, prices): (Vec<Block>, Vec<f64>) =
                row.prices.iter().map(|(block, price)| (*block, *price)).unzip();
            let ([first, second], [first_price, second_price]) =
                (blocks.as_slice(), prices.as_slice())
            else {
                return Err(ConfigurationError::MergeShape(blocks.len()));
            };

            let contract = Contract {
                iso,
                volume: 1.0,
                frequency: Frequency::Monthly,
                start: row.month,
                block: Block::Atc,
            };
            let hours = translate_blocks(
                calendar,
                matrix,
                &contract,
                &[*first, *second],
                VolumeUnit::Mwh,
            )?;
            let first_hours = hours.total(*first);
            let second_hours = hours.total(*second);

            let total = (first_price * first_hours + second_price * second_hours)
                / (first_hours + second_hours);
            event!(
                Level::DEBUG,
                month = %row.month,
                %output_block,
                first_hours,
                second_hours,
                total,
                "merged block prices"
            );

            Ok(MergedPrices {
                month: row.month,
                prices: row.prices.clone(),
                total,
            })
        })
        .collect()
}
