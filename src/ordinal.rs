//! Ordinal mentions ("third", "21st").
//!
//! Recognition itself belongs to the linguistic provider. This module only
//! drops ordinals whose span falls inside a date mention.

use crate::linguistic::{LinguisticProvider, Token};
use crate::{DateMatch, OrdinalMatch, Result};

/// Ordinals found by `provider`, minus those inside any of `dates`.
pub fn find_ordinals(
    provider: &dyn LinguisticProvider,
    text: &str,
    tokens: &[Token],
    dates: &[DateMatch],
) -> Result<Vec<OrdinalMatch>> {
    let ordinals = provider.find_ordinals(text, tokens)?;
    Ok(outside_dates(ordinals, dates))
}

/// Keep the ordinals not contained in any date span.
#[must_use]
pub fn outside_dates(ordinals: Vec<OrdinalMatch>, dates: &[DateMatch]) -> Vec<OrdinalMatch> {
    ordinals
        .into_iter()
        .filter(|o| {
            let inside = dates.iter().any(|d| d.span.contains(&o.span));
            if inside {
                log::trace!("[ordinal] {:?} at {} is inside a date", o.text, o.span);
            }
            !inside
        })
        .collect()
}
