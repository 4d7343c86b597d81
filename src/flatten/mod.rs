//! Path flattening with deterministic collision resolution.
//!
//! This module maps an ordered set of reference strings (paths as they appear in a
//! scene document) to short, collision-free names suitable for a single flat cache
//! directory. It is pure string manipulation: no filesystem access, no allocation
//! beyond the returned mapping.
//!
//! # Depth policy
//!
//! How much directory structure survives is controlled by [`FlattenPolicy::depth`]:
//!
//! - `None` or `Some(0)` ("maximum flatten"): a reference collapses to
//!   `<parent>_<filename>`, or just `<filename>` when it has no parent directory.
//! - `Some(n)` with `n > 0`: the deepest `n` directory segments are kept verbatim,
//!   joined with `/`; references with fewer than `n` directory segments pass through
//!   unchanged.
//!
//! An optional [`FlattenPolicy::base_dir`] prefix is stripped before windowing, and
//! references with no directory separator at all (plus any literal paths in the
//! policy's passthrough set) map to themselves.
//!
//! # Collision resolution
//!
//! Two references may produce the same initial candidate (`a/x/tip.stl` and
//! `b/x/tip.stl` both want `x_tip.stl`). Resolution proceeds in rounds: every
//! reference whose candidate is unique keeps it permanently; all still-colliding
//! references widen their retained window by one ancestor directory and try again.
//! A reference whose window already spans its whole path falls back to the full
//! original string with `/` replaced by `_`, which transfers the uniqueness of the
//! input strings onto the candidates. In the pathological case where a literal `_`
//! in one reference aliases a `/` in another, a numeric suffix disambiguates as a
//! last resort, so the returned mapping is injective for any finite set of distinct
//! inputs.
//!
//! Ties are broken by input order: earlier references stabilize on shorter names
//! where possible, later ones absorb the extra segments. The whole procedure is
//! deterministic for a fixed input ordering.
//!
//! # Examples
//!
//! ```rust
//! use assetcache_cli::flatten::{FlattenPolicy, flatten_references};
//!
//! let refs = vec![
//!     "assets/textures/wood.png".to_string(),
//!     "assets/models/robot/hand.stl".to_string(),
//! ];
//! let policy = FlattenPolicy::new().with_base_dir("assets");
//! let mapping = flatten_references(&refs, &policy);
//!
//! assert_eq!(mapping["assets/textures/wood.png"], "textures_wood.png");
//! assert_eq!(mapping["assets/models/robot/hand.stl"], "robot_hand.stl");
//! ```

use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Policy inputs for one flattening run.
///
/// Immutable once built; supplied to [`flatten_references`] alongside the reference
/// list. The same policy applied to the same ordered input always yields the same
/// mapping.
///
/// # Examples
///
/// ```rust
/// use assetcache_cli::flatten::FlattenPolicy;
///
/// let policy = FlattenPolicy::new()
///     .with_base_dir("assets")
///     .with_depth(1)
///     .keep("/opt/shared/calibration.yaml");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlattenPolicy {
    /// Optional prefix stripped from references before windowing. A reference equal
    /// to exactly `base_dir` (no trailing separator) is left untouched.
    pub base_dir: Option<String>,
    /// Directory levels preserved verbatim; `None` and `Some(0)` both mean maximum
    /// flattening to `parent_filename` form.
    pub depth: Option<usize>,
    /// Literal reference strings that always map to themselves, regardless of the
    /// rest of the policy.
    pub passthrough: HashSet<String>,
}

impl FlattenPolicy {
    /// Create an empty policy: no base directory, maximum flattening, no escapes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base directory prefix to strip.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<String>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Set the number of trailing directory segments to preserve.
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Add a literal reference to the passthrough escape set.
    #[must_use]
    pub fn keep(mut self, reference: impl Into<String>) -> Self {
        self.passthrough.insert(reference.into());
        self
    }
}

/// Widening state of one reference during collision resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Passthrough: the candidate is the original reference, permanently.
    Fixed,
    /// Retaining the deepest `n` directory segments of the normalized path.
    Window(usize),
    /// The normalized path unchanged (depth policy exceeds the segment count).
    Full,
    /// The full original reference with separators joined by `_`.
    Terminal,
}

#[derive(Debug)]
struct Member<'a> {
    original: &'a str,
    /// Original with any `base_dir` prefix stripped.
    normalized: &'a str,
    /// Non-empty directory segments of the normalized path.
    dirs: Vec<&'a str>,
    filename: &'a str,
    stage: Stage,
    stabilized: bool,
}

impl<'a> Member<'a> {
    fn new(original: &'a str, policy: &FlattenPolicy) -> Self {
        if !original.contains('/') || policy.passthrough.contains(original) {
            return Self {
                original,
                normalized: original,
                dirs: Vec::new(),
                filename: original,
                stage: Stage::Fixed,
                stabilized: false,
            };
        }

        let normalized = policy
            .base_dir
            .as_deref()
            .and_then(|base| original.strip_prefix(base))
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|rest| !rest.is_empty())
            .unwrap_or(original);

        let (dir_part, filename) = match normalized.rfind('/') {
            Some(idx) => (&normalized[..idx], &normalized[idx + 1..]),
            None => ("", normalized),
        };
        let dirs: Vec<&str> = dir_part.split('/').filter(|s| !s.is_empty()).collect();

        let depth = policy.depth.unwrap_or(0);
        let stage = if depth == 0 {
            Stage::Window(dirs.len().min(1))
        } else if dirs.len() < depth {
            Stage::Full
        } else {
            Stage::Window(depth)
        };

        Self {
            original,
            normalized,
            dirs,
            filename,
            stage,
            stabilized: false,
        }
    }

    /// Current candidate name for this member.
    fn candidate(&self, flat: bool) -> String {
        match self.stage {
            Stage::Fixed => self.original.to_string(),
            Stage::Full => self.normalized.to_string(),
            Stage::Terminal => self.original.replace('/', "_"),
            Stage::Window(w) => {
                let mut parts: Vec<&str> = self.dirs[self.dirs.len() - w..].to_vec();
                parts.push(self.filename);
                parts.join(if flat { "_" } else { "/" })
            }
        }
    }

    /// Whether this member's name is settled for good.
    fn holds_name(&self) -> bool {
        self.stabilized || self.stage == Stage::Fixed
    }

    fn can_advance(&self) -> bool {
        !matches!(self.stage, Stage::Fixed | Stage::Terminal)
    }

    /// Widen the retained window by one segment, falling back to the terminal form
    /// once the window spans the whole path.
    fn advance(&mut self) {
        self.stage = match self.stage {
            Stage::Window(w) if w < self.dirs.len() => Stage::Window(w + 1),
            Stage::Window(_) | Stage::Full => Stage::Terminal,
            stage => stage,
        };
    }
}

/// Map each distinct reference to a collision-free flattened name.
///
/// Pure and total: any input produces a mapping, and distinct references always
/// receive distinct names. Duplicate references collapse to their first occurrence.
/// See the module docs for the algorithm.
///
/// # Examples
///
/// ```rust
/// use assetcache_cli::flatten::{FlattenPolicy, flatten_references};
///
/// let refs = vec!["a/x/tip.stl".to_string(), "b/x/tip.stl".to_string()];
/// let mapping = flatten_references(&refs, &FlattenPolicy::new());
///
/// assert_eq!(mapping["a/x/tip.stl"], "a_x_tip.stl");
/// assert_eq!(mapping["b/x/tip.stl"], "b_x_tip.stl");
/// ```
#[must_use]
pub fn flatten_references(
    references: &[String],
    policy: &FlattenPolicy,
) -> HashMap<String, String> {
    let mut seen = HashSet::new();
    let ordered: Vec<&str> =
        references.iter().map(String::as_str).filter(|r| seen.insert(*r)).collect();
    if ordered.is_empty() {
        return HashMap::new();
    }

    let flat = policy.depth.unwrap_or(0) == 0;
    let mut members: Vec<Member<'_>> =
        ordered.iter().map(|&r| Member::new(r, policy)).collect();

    loop {
        let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, member) in members.iter().enumerate() {
            buckets.entry(member.candidate(flat)).or_default().push(idx);
        }

        // A unique name is final; its owner keeps it through later rounds.
        for indices in buckets.values() {
            if indices.len() == 1 {
                members[indices[0]].stabilized = true;
            }
        }

        let mut advanced = false;
        let mut colliding = false;
        for (name, indices) in &buckets {
            if indices.len() < 2 {
                continue;
            }
            colliding = true;
            trace!("flatten collision on '{}': {} references", name, indices.len());
            for &idx in indices {
                let member = &mut members[idx];
                if member.holds_name() || !member.can_advance() {
                    continue;
                }
                member.advance();
                advanced = true;
            }
        }

        // Either every name is unique, or only exhausted members still collide
        // (resolved by the suffix pass below).
        if !colliding || !advanced {
            break;
        }
    }

    // Passthrough and stabilized members claim their names first; anything still
    // contested takes a numeric suffix, later input positions yielding.
    let mut taken: HashSet<String> = HashSet::new();
    for member in &members {
        if member.holds_name() {
            taken.insert(member.candidate(flat));
        }
    }

    let mut mapping = HashMap::with_capacity(members.len());
    for member in &members {
        let name = member.candidate(flat);
        let final_name = if member.holds_name() || taken.insert(name.clone()) {
            name
        } else {
            let mut n = 2;
            loop {
                let alt = format!("{name}_{n}");
                if taken.insert(alt.clone()) {
                    break alt;
                }
                n += 1;
            }
        };
        mapping.insert(member.original.to_string(), final_name);
    }
    mapping
}
