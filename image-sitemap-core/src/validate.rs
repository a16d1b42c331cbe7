//! Record validation and the policy applied to invalid records.
//!
//! The only invalid input is a node or image whose location URL is blank or
//! holds characters XML cannot carry.
//! Under [`RecordPolicy::Reject`] the first such record fails the whole call;
//! under [`RecordPolicy::Skip`] it is dropped and reported back to the caller.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::NodeRecord;

/// A record that cannot be rendered because its location URL is blank or malformed.
///
/// Indices are zero-based positions in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InvalidRecord {
    #[error("invalid record: node #{index} has no usable location URL")]
    Node { index: usize },

    #[error("invalid record: image #{index} of node #{node} has no usable location URL")]
    Image { node: usize, index: usize },
}

/// Every invalid record in `nodes`, in input order.
///
/// Images of a node that is itself invalid are still reported.
pub fn validate(nodes: &[NodeRecord]) -> Vec<InvalidRecord> {
    let mut found = Vec::new();
    for (n, node) in nodes.iter().enumerate() {
        if !node.loc.is_usable() {
            found.push(InvalidRecord::Node { index: n });
        }
        for (i, image) in node.images.iter().enumerate() {
            if !image.loc.is_usable() {
                found.push(InvalidRecord::Image { node: n, index: i });
            }
        }
    }
    found
}

// ---------------------------------------------------------------------------
// RecordPolicy
// ---------------------------------------------------------------------------

/// What to do with an invalid record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordPolicy {
    /// Fail the whole render on the first invalid record.
    #[default]
    Reject,
    /// Drop invalid records, keep rendering, report what was dropped.
    Skip,
}

impl FromStr for RecordPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "unknown record policy '{other}'; expected: reject, skip"
            )),
        }
    }
}

impl fmt::Display for RecordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordPolicy::Reject => write!(f, "reject"),
            RecordPolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Records that passed the policy, ready to render.
#[derive(Debug, Clone)]
pub struct Accepted<'a> {
    /// Nodes in input order. Untouched nodes are borrowed.
    pub nodes: Vec<Cow<'a, NodeRecord>>,
    /// Records dropped under [`RecordPolicy::Skip`]; always empty for `Reject`.
    pub skipped: Vec<InvalidRecord>,
}

impl Accepted<'_> {
    /// Accepted nodes, in input order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeRecord> + '_ {
        self.nodes.iter().map(|n| &**n)
    }

    pub fn image_count(&self) -> usize {
        self.nodes.iter().map(|n| n.images.len()).sum()
    }
}

impl RecordPolicy {
    /// Apply this policy to `nodes`.
    ///
    /// A skipped node takes all of its images with it; a skipped image leaves
    /// its node in place.
    pub fn apply<'a>(&self, nodes: &'a [NodeRecord]) -> Result<Accepted<'a>, InvalidRecord> {
        match self {
            RecordPolicy::Reject => {
                if let Some(first) = validate(nodes).into_iter().next() {
                    return Err(first);
                }
                Ok(Accepted {
                    nodes: nodes.iter().map(Cow::Borrowed).collect(),
                    skipped: Vec::new(),
                })
            }
            RecordPolicy::Skip => Ok(skip_invalid(nodes)),
        }
    }
}

fn skip_invalid(nodes: &[NodeRecord]) -> Accepted<'_> {
    let mut kept = Vec::with_capacity(nodes.len());
    let mut skipped = Vec::new();

    for (n, node) in nodes.iter().enumerate() {
        if !node.loc.is_usable() {
            tracing::warn!(node = n, images = node.images.len(), "skipping node without location URL");
            skipped.push(InvalidRecord::Node { index: n });
            continue;
        }
        if node.images.iter().all(|img| img.loc.is_usable()) {
            kept.push(Cow::Borrowed(node));
            continue;
        }

        let mut owned = NodeRecord::new(node.loc.clone());
        for (i, image) in node.images.iter().enumerate() {
            if !image.loc.is_usable() {
                tracing::warn!(node = n, image = i, loc = %node.loc, "skipping image without location URL");
                skipped.push(InvalidRecord::Image { node: n, index: i });
            } else {
                owned.images.push(image.clone());
            }
        }
        kept.push(Cow::Owned(owned));
    }

    Accepted {
        nodes: kept,
        skipped,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
