//! Helpers for building trees from text fixtures.

use std::str::FromStr;

use crate::error::Error;

/// Parses a comma separated list of keys such as `"13, 8, 17"`. Surrounding whitespace is
/// ignored and a blank input is an empty list.
///
/// Every entry is parsed before anything is returned, so callers building a tree from the
/// result never insert part of a bad list.
///
/// # Examples
///
/// ```
/// use rbindex::util::parse_keys;
/// use rbindex::Error;
///
/// assert_eq!(parse_keys::<i32>("13, 8,17"), Ok(vec![13, 8, 17]));
/// assert_eq!(parse_keys::<i32>("1,,3"), Err(Error::NullKey(1)));
/// assert_eq!(parse_keys::<i32>("1,x"), Err(Error::Parse("x".to_string())));
/// ```
pub fn parse_keys<K: FromStr>(text: &str) -> Result<Vec<K>, Error> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    text.split(',')
        .enumerate()
        .map(|(position, token)| {
            let token = token.trim();
            if token.is_empty() {
                return Err(Error::NullKey(position));
            }
            token.parse().map_err(|_| Error::Parse(token.to_string()))
        })
        .collect()
}
