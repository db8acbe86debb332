use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::ResolverOpts;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::{ResolveError, TokioResolver};
use tracing::{debug, trace};

use crate::config::ResolverConfig;
use crate::error::{Result, ScanError};

/// DNS classification of one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The name has no record at all
    NotFound,
    /// The name is a CNAME to another name
    ///
    /// `target_unresolvable` is set when the CNAME target itself has no record
    /// (NXDOMAIN or an empty answer), meaning nothing currently claims it.
    Dangling { cname: String, target_unresolvable: bool },
    /// The name resolves without a CNAME, or through a CNAME pointing at itself
    Direct { host: String },
    /// The lookup failed (timeout, SERVFAIL, refused, ...)
    Error(String),
}

/// DNS lookups for the detection pipeline
///
/// Implementations must not retry: a failed lookup is reported as [`Resolution::Error`].
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve(&self, target: &str) -> Resolution;
}

/// [`Resolve`] backed by hickory with the system resolver configuration
pub struct DnsResolver {
    inner: TokioResolver,
}

impl DnsResolver {
    pub fn from_system_conf(config: &ResolverConfig) -> Result<Self> {
        let mut opts = ResolverOpts::default();
        opts.timeout = Duration::from_secs(config.timeout_secs);
        opts.attempts = 1;

        let inner = TokioResolver::builder(TokioConnectionProvider::default())
            .map_err(|e| ScanError::Resolver(format!("Failed to read system resolver config: {e}")))?
            .with_options(opts)
            .build();
        Ok(Self { inner })
    }

    async fn lookup_cname(&self, name: &str) -> std::result::Result<Option<String>, ResolveError> {
        match self.inner.lookup(name, RecordType::CNAME).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .find_map(|rdata| rdata.as_cname())
                .map(|cname| normalize(&cname.0.to_string()))),
            Err(e) if is_missing(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `Ok(false)` when the name has no address record
    async fn has_address(&self, name: &str) -> std::result::Result<bool, ResolveError> {
        match self.inner.lookup_ip(name).await {
            Ok(lookup) => Ok(lookup.iter().next().is_some()),
            Err(e) if is_missing(&e) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl Resolve for DnsResolver {
    async fn resolve(&self, target: &str) -> Resolution {
        let name = normalize(target);

        let cname = match self.lookup_cname(&name).await {
            Ok(cname) => cname,
            Err(e) => {
                debug!(target = %name, error = %e, "CNAME lookup failed");
                return Resolution::Error(e.to_string());
            }
        };

        if let Some(cname) = cname.filter(|c| *c != name) {
            return match self.has_address(&cname).await {
                Ok(resolves) => {
                    trace!(target = %name, %cname, resolves, "dangling candidate");
                    Resolution::Dangling { cname, target_unresolvable: !resolves }
                }
                Err(e) => Resolution::Error(e.to_string()),
            };
        }

        match self.has_address(&name).await {
            Ok(true) => Resolution::Direct { host: name },
            Ok(false) => Resolution::NotFound,
            Err(e) => Resolution::Error(e.to_string()),
        }
    }
}

fn is_missing(err: &ResolveError) -> bool {
    err.is_nx_domain() || err.is_no_records_found()
}

/// Lowercases and strips the root label so `Foo.Example.COM.` equals `foo.example.com`
pub(crate) fn normalize(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}
