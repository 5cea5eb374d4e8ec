//! # Source-to-target providers
//!
//! A `SourceToTargetProvider` knows some way of mapping a source file to the targets that build
//! it. Providers are registered in a `SourceToTargetMap` in order, and the map asks all of them at
//! once: the first provider able to handle the file decides the answer.
//!
mod query;
mod target_map;

pub use query::*;
pub use target_map::*;

use crate::events::event::{LookupEvent, ResolutionEvent};
use crate::events::EventChannel;
use crate::model::{Project, TargetInfo, WorkspacePath};
use crate::resolver::{FailurePolicy, FirstSatisfying, LookupError, PendingLookup};
use crate::sync::Arc;
use crate::Config;
use async_trait::async_trait;
use tracing::*;

#[async_trait]
pub trait SourceToTargetProvider: Send + Sync {
    /// A short name for this provider, used in logs and events.
    fn name(&self) -> &str;

    /// Query the targets building `source`.
    ///
    /// Returns `Ok(None)` when this provider can't handle the file, so that other providers get
    /// a chance to answer.
    ///
    async fn targets_building_source_file(
        &self,
        project: &Project,
        source: &WorkspacePath,
    ) -> Result<Option<Vec<TargetInfo>>, LookupError>;
}

/// An ordered registry of providers.
///
#[derive(Clone, Default)]
pub struct SourceToTargetMap {
    providers: Vec<Arc<dyn SourceToTargetProvider>>,
    failure_policy: FailurePolicy,
    event_channel: Arc<EventChannel>,
}

impl SourceToTargetMap {
    pub fn new(config: &Config) -> Self {
        Self {
            providers: vec![],
            failure_policy: config.failure_policy(),
            event_channel: config.event_channel(),
        }
    }

    /// The providers every workspace gets: synced project data first, then the build tool.
    pub fn with_default_providers(config: &Config) -> Self {
        let mut map = Self::new(config);
        map.register(TargetMapProvider)
            .register(QueryProvider::new(config.build_tool()).with_env(config.env().clone()));
        map
    }

    pub fn register<P>(&mut self, provider: P) -> &mut Self
    where
        P: SourceToTargetProvider + 'static,
    {
        self.providers.push(Arc::new(provider));
        self
    }

    pub fn has_provider(&self) -> bool {
        !self.providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Returns the targets reported by the first provider able to handle `source`.
    ///
    /// Every provider runs as its own task on the current tokio runtime, and whatever is still
    /// running when an answer is found gets cancelled. An empty list of targets is not an answer.
    /// Resolves to `Ok(None)` when no provider could handle the file.
    ///
    #[tracing::instrument(
        name = "SourceToTargetMap::find_targets_building_source_file",
        skip(self, project),
        fields(project = project.name())
    )]
    pub fn find_targets_building_source_file(
        &self,
        project: &Project,
        source: &WorkspacePath,
    ) -> FirstSatisfying<Vec<TargetInfo>> {
        if self.providers.is_empty() {
            self.event_channel.send(ResolutionEvent::NoProvidersRegistered {
                source: source.to_string(),
            });
        } else {
            self.event_channel.send(ResolutionEvent::ResolutionStarted {
                source: source.to_string(),
                provider_count: self.providers.len(),
            });
        }

        let lookups: Vec<PendingLookup<Vec<TargetInfo>>> = self
            .providers
            .iter()
            .map(|provider| {
                let provider = provider.clone();
                let project = project.clone();
                let source = source.clone();
                let event_channel = self.event_channel.clone();
                PendingLookup::spawn(async move {
                    lookup(provider.as_ref(), &project, &source, &event_channel).await
                })
            })
            .collect();

        FirstSatisfying::new(lookups)
            .with_predicate(|targets: &Vec<TargetInfo>| !targets.is_empty())
            .with_policy(self.failure_policy)
    }
}

async fn lookup(
    provider: &dyn SourceToTargetProvider,
    project: &Project,
    source: &WorkspacePath,
    event_channel: &EventChannel,
) -> Result<Option<Vec<TargetInfo>>, LookupError> {
    let name = provider.name().to_string();
    event_channel.send(LookupEvent::LookupStarted {
        provider: name.clone(),
        source: source.to_string(),
    });

    let result = provider.targets_building_source_file(project, source).await;

    let event = match &result {
        Ok(Some(targets)) => {
            debug!("{} found {} targets for {}", name, targets.len(), source);
            LookupEvent::LookupAnswered {
                provider: name,
                source: source.to_string(),
                target_count: targets.len(),
            }
        }
        Ok(None) => LookupEvent::LookupDeclined {
            provider: name,
            source: source.to_string(),
        },
        Err(err) => {
            warn!("{} could not look up {}: {}", name, source, err);
            LookupEvent::LookupFailed {
                provider: name,
                source: source.to_string(),
                error: err.to_string(),
            }
        }
    };
    event_channel.send(event);

    result
}

impl std::fmt::Debug for SourceToTargetMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceToTargetMap")
            .field("providers", &self.provider_names())
            .field("failure_policy", &self.failure_policy)
            .finish()
    }
}
