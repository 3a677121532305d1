//! Depth-bounded walk over the registry's dependency graph.
//!
//! The walk is depth-first and strictly sequential. For each name the
//! package's latest metadata is fetched, its own dependencies are walked
//! with one less level of budget, and only then is its funding written to
//! the shared accumulator. A package reached along several paths is
//! therefore left holding the value of the last visit to finish.

use futures::future::{BoxFuture, FutureExt};
use lnfund_deps::{Funding, FundingMap};
use lnfund_info::Registry;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::progress::ProgressSink;

/// What to do when a package shows up again during one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalPolicy {
    /// Fetch and walk every occurrence again, bounded only by depth.
    #[default]
    Revisit,
    /// Fetch each package at most once per walk.
    ///
    /// Later occurrences reuse the first lookup, and a package already
    /// walked with the same remaining budget replays the writes that walk
    /// made instead of descending again. The resulting map, order included,
    /// only differs from [`TraversalPolicy::Revisit`] if the registry
    /// answers differently for the same package within one walk.
    SkipVisited,
}

/// Counters for one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveStats {
    /// Registry lookups issued.
    pub lookups: usize,
    /// Lookups that failed (network, status, timeout, malformed body).
    pub failures: usize,
    /// Occurrences answered from memory under [`TraversalPolicy::SkipVisited`].
    pub skipped_revisits: usize,
}

/// What one lookup produced.
#[derive(Clone)]
struct Fetched {
    children: Vec<String>,
    funding: Option<Funding>,
}

/// Per-walk bookkeeping, separate from the caller's accumulator.
#[derive(Default)]
struct Walk {
    stats: ResolveStats,
    // Lookup outcome per package; `None` when it failed.
    fetched: HashMap<String, Option<Fetched>>,
    // First-write order of the keys written by walking a package with a budget.
    subtrees: HashMap<(String, u32), Vec<String>>,
    // Every key written so far, in write order.
    journal: Vec<String>,
}

impl Walk {
    fn write(&mut self, accumulator: &mut FundingMap, name: &str, funding: Option<Funding>) {
        accumulator.insert(name.to_string(), funding);
        self.journal.push(name.to_string());
    }

    fn replay(&mut self, accumulator: &mut FundingMap, writes: &[String]) {
        for name in writes {
            let funding = match self.fetched.get(name) {
                Some(Some(fetched)) => fetched.funding.clone(),
                _ => continue,
            };
            self.write(accumulator, name, funding);
        }
    }

    fn record_subtree(&mut self, name: &str, remaining_depth: u32, since: usize) {
        let mut seen = HashSet::new();
        let writes = self.journal[since..]
            .iter()
            .filter(|key| seen.insert(key.as_str()))
            .cloned()
            .collect();
        self.subtrees
            .insert((name.to_string(), remaining_depth), writes);
    }
}

/// Walks dependency names against a [`Registry`].
pub struct Resolver<R> {
    registry: R,
    policy: TraversalPolicy,
    progress: Option<Arc<dyn ProgressSink>>,
}

impl<R: Registry> Resolver<R> {
    /// Create a resolver with the default [`TraversalPolicy::Revisit`].
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            policy: TraversalPolicy::default(),
            progress: None,
        }
    }

    /// Set the revisit policy.
    pub fn with_policy(mut self, policy: TraversalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Report each lookup to `sink`.
    pub fn with_progress(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.progress = Some(sink);
        self
    }

    /// The registry lookups go to.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// The revisit policy in effect.
    pub fn policy(&self) -> TraversalPolicy {
        self.policy
    }

    pub(crate) fn progress(&self) -> Option<&Arc<dyn ProgressSink>> {
        self.progress.as_ref()
    }

    /// Walk `names` up to `remaining_depth` levels, writing into `accumulator`.
    ///
    /// With a budget of zero nothing is fetched. A package whose lookup
    /// fails gets no entry and its dependencies are not explored; the walk
    /// carries on with its siblings.
    pub async fn resolve(
        &self,
        names: &[String],
        remaining_depth: u32,
        accumulator: &mut FundingMap,
    ) -> ResolveStats {
        let mut walk = Walk::default();
        self.visit(names, remaining_depth, accumulator, &mut walk).await;
        walk.stats
    }

    fn visit<'a>(
        &'a self,
        names: &'a [String],
        remaining_depth: u32,
        accumulator: &'a mut FundingMap,
        walk: &'a mut Walk,
    ) -> BoxFuture<'a, ()> {
        async move {
            if remaining_depth == 0 {
                return;
            }

            let skip_visited = self.policy == TraversalPolicy::SkipVisited;

            for name in names {
                if skip_visited {
                    let key = (name.clone(), remaining_depth);
                    if let Some(writes) = walk.subtrees.get(&key).cloned() {
                        tracing::trace!(package = %name, remaining_depth, "replaying visited subtree");
                        walk.stats.skipped_revisits += 1;
                        walk.replay(accumulator, &writes);
                        continue;
                    }
                }

                let cached = if skip_visited {
                    walk.fetched.get(name).cloned()
                } else {
                    None
                };
                let fetched = match cached {
                    Some(outcome) => {
                        walk.stats.skipped_revisits += 1;
                        outcome
                    }
                    None => self.lookup(name, walk).await,
                };
                let Some(Fetched { children, funding }) = fetched else {
                    continue;
                };

                tracing::debug!(
                    package = %name,
                    remaining_depth,
                    dependencies = children.len(),
                    "resolved"
                );
                let since = walk.journal.len();
                self.visit(&children, remaining_depth - 1, accumulator, walk)
                    .await;
                walk.write(accumulator, name, funding);

                if skip_visited {
                    walk.record_subtree(name, remaining_depth, since);
                }
            }
        }
        .boxed()
    }

    /// Fetch `name`, remembering the outcome when revisits are skipped.
    async fn lookup(&self, name: &str, walk: &mut Walk) -> Option<Fetched> {
        if let Some(progress) = &self.progress {
            progress.analyzing(name);
        }

        walk.stats.lookups += 1;
        let fetched = match self.registry.latest(name).await {
            Ok(metadata) => Some(Fetched {
                children: metadata.dependency_names(),
                funding: metadata.funding,
            }),
            Err(e) => {
                walk.stats.failures += 1;
                tracing::warn!(package = %name, error = %e, "Failed to fetch package info, skipping");
                None
            }
        };

        if self.policy == TraversalPolicy::SkipVisited {
            walk.fetched.insert(name.to_string(), fetched.clone());
        }
        fetched
    }
}
