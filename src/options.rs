//! Optional query parameters, one structure per family of endpoints.
//! Unset fields are left off the query string and the API applies its own
//! defaults (limit 20, offset 0, market of the token's user).


/// Anything that contributes query pairs to a request.
pub trait QueryParams {
    /// Pairs for every field that is set, in declaration order.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

fn push<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<T>) {
    if let Some(v) = value {
        pairs.push((key, v.to_string()));
    }
}

/// `/search` parameters other than `type` and `q`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// ISO 3166-1 alpha-2 country code, or `from_token`.
    pub market: Option<String>,
}

impl QueryParams for SearchOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "limit", &self.limit);
        push(&mut pairs, "offset", &self.offset);
        push(&mut pairs, "market", &self.market);
        pairs
    }
}

/// Parameters of the `/browse` endpoints. `locale` and `timestamp` only
/// apply to featured playlists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseOptions {
    pub country: Option<String>,
    pub locale: Option<String>,
    /// ISO 8601 local time, e.g. `2014-10-23T09:00:00`.
    pub timestamp: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl QueryParams for BrowseOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "country", &self.country);
        push(&mut pairs, "locale", &self.locale);
        push(&mut pairs, "timestamp", &self.timestamp);
        push(&mut pairs, "limit", &self.limit);
        push(&mut pairs, "offset", &self.offset);
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl QueryParams for PageOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "limit", &self.limit);
        push(&mut pairs, "offset", &self.offset);
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketOptions {
    pub market: Option<String>,
}

impl QueryParams for MarketOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "market", &self.market);
        pairs
    }
}

/// Adding tracks: zero-based insert position, appended when unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifyTracksOptions {
    pub position: Option<u32>,
}

impl QueryParams for ModifyTracksOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "position", &self.position);
        pairs
    }
}
