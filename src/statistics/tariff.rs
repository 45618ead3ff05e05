use rust_decimal::Decimal;

use crate::{
    core::tariff::TariffStructure,
    error::ValidationError,
    quantity::energy::KilowattHours,
};

/// Order the tariffs by total cost at the given consumption, cheapest first.
///
/// Tariffs with equal cost keep their input order.
pub fn rank_tariffs(
    tariffs: impl IntoIterator<Item = TariffStructure>,
    consumption: KilowattHours,
) -> Result<Vec<(TariffStructure, Decimal)>, ValidationError> {
    let mut ranked: Vec<_> = tariffs
        .into_iter()
        .map(|tariff| {
            let total_cost = tariff.total_cost(consumption)?;
            Ok((tariff, total_cost))
        })
        .collect::<Result<_, ValidationError>>()?;
    ranked.sort_by(|(_, lhs), (_, rhs)| lhs.cmp(rhs));
    Ok(ranked)
}
