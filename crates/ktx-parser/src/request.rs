//! Parse requests

use ktx_headers::KeyValueLimits;
use ktx_io::Channel;

/// Everything a parser needs: the channel, a name for diagnostics, and the
/// limits applied to declared sizes
#[derive(Debug, Clone)]
pub struct ParseRequest<C: Channel> {
    channel: C,
    source: String,
    limits: KeyValueLimits,
}

impl<C: Channel> ParseRequest<C> {
    /// A request with the default limits
    pub fn new(channel: C, source: impl Into<String>) -> Self {
        Self::builder(channel, source).build()
    }

    pub fn builder(channel: C, source: impl Into<String>) -> ParseRequestBuilder<C> {
        ParseRequestBuilder {
            channel,
            source: source.into(),
            limits: KeyValueLimits::default(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn key_value_region_limit(&self) -> u64 {
        self.limits.region
    }

    pub fn key_value_datum_limit(&self) -> u64 {
        self.limits.datum
    }

    pub fn limits(&self) -> &KeyValueLimits {
        &self.limits
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub(crate) fn into_parts(self) -> (C, String, KeyValueLimits) {
        (self.channel, self.source, self.limits)
    }
}

/// Builder for [`ParseRequest`]
#[derive(Debug, Clone)]
pub struct ParseRequestBuilder<C: Channel> {
    channel: C,
    source: String,
    limits: KeyValueLimits,
}

impl<C: Channel> ParseRequestBuilder<C> {
    pub fn channel(mut self, channel: C) -> Self {
        self.channel = channel;
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Largest accepted `bytesOfKeyValueData`
    pub fn key_value_region_limit(mut self, limit: u64) -> Self {
        self.limits.region = limit;
        self
    }

    /// Largest accepted single key/value record
    pub fn key_value_datum_limit(mut self, limit: u64) -> Self {
        self.limits.datum = limit;
        self
    }

    pub fn build(self) -> ParseRequest<C> {
        ParseRequest {
            channel: self.channel,
            source: self.source,
            limits: self.limits,
        }
    }
}
