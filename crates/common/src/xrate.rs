// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Exchange rate calculations between currencies.
//!
//! An exchange rate is the value of one asset versus that of another, triangulated through
//! a quote table of `"BASE/QUOTE"` symbols when no direct quote is available.

use std::collections::{HashMap, HashSet};

use axiom_model::enums::PriceType;
use ustr::Ustr;

/// Returns the calculated exchange rate for the given price type using the given table of
/// bid and ask quotes, keyed by `"BASE/QUOTE"` symbol strings.
///
/// # Errors
///
/// Returns an error if `quotes_bid` and `quotes_ask` do not have the same key set, or if
/// `price_type` is not one of `Bid`, `Ask`, or `Mid`.
pub fn get_exchange_rate(
    from_currency: Ustr,
    to_currency: Ustr,
    price_type: PriceType,
    quotes_bid: HashMap<String, f64>,
    quotes_ask: HashMap<String, f64>,
) -> anyhow::Result<Option<f64>> {
    if from_currency == to_currency {
        return Ok(Some(1.0));
    }

    if quotes_bid.is_empty() || quotes_ask.is_empty() {
        return Ok(None);
    }
    anyhow::ensure!(
        quotes_bid.len() == quotes_ask.len(),
        "quotes_bid and quotes_ask must quote the same symbols"
    );

    let calculation_quotes: HashMap<String, f64> = match price_type {
        PriceType::Bid => quotes_bid,
        PriceType::Ask => quotes_ask,
        PriceType::Mid => quotes_bid
            .iter()
            .map(|(symbol, bid)| {
                let ask = quotes_ask.get(symbol).unwrap_or(bid);
                (symbol.clone(), (bid + ask) / 2.0)
            })
            .collect(),
        _ => anyhow::bail!("cannot calculate exchange rate for price type {price_type:?}"),
    };

    let mut codes: HashSet<Ustr> = HashSet::new();
    let mut rates: HashMap<Ustr, HashMap<Ustr, f64>> = HashMap::new();

    for (symbol, quote) in &calculation_quotes {
        let Some((lhs, rhs)) = symbol.split_once('/') else {
            continue;
        };
        let code_lhs = Ustr::from(lhs);
        let code_rhs = Ustr::from(rhs);
        codes.insert(code_lhs);
        codes.insert(code_rhs);

        let rates_lhs = rates.entry(code_lhs).or_default();
        rates_lhs.insert(code_lhs, 1.0);
        rates_lhs.insert(code_rhs, *quote);
        rates.entry(code_rhs).or_default().insert(code_rhs, 1.0);
    }

    let pairs: Vec<(Ustr, Ustr)> = codes
        .iter()
        .flat_map(|a| codes.iter().map(move |b| (*a, *b)))
        .filter(|(a, b)| a != b)
        .collect();

    // Fill in inverse rates for any direct quote.
    for (a, b) in &pairs {
        if let Some(rate) = rates.get(a).and_then(|r| r.get(b)).copied()
            && let Some(rates_b) = rates.get_mut(b)
            && !rates_b.contains_key(a)
        {
            rates_b.insert(*a, 1.0 / rate);
        }
    }

    if let Some(direct) = rates.get(&from_currency).and_then(|r| r.get(&to_currency)) {
        return Ok(Some(*direct));
    }

    // Triangulate remaining pairs through a common currency.
    for (a, b) in &pairs {
        if rates.get(b).is_some_and(|r| r.contains_key(a)) {
            continue;
        }

        for code in &codes {
            let via_common = rates
                .get(a)
                .and_then(|r| r.get(code))
                .zip(rates.get(b).and_then(|r| r.get(code)))
                .map(|(x, y)| (*x, *y));

            if let Some((rate_a, rate_b)) = via_common {
                rates.entry(*b).or_default().insert(*a, rate_b / rate_a);
                rates.entry(*a).or_default().insert(*b, rate_a / rate_b);
                break;
            }
        }
    }

    Ok(rates
        .get(&from_currency)
        .and_then(|r| r.get(&to_currency))
        .copied())
}
