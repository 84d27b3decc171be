use std::collections::{HashMap, HashSet};

use crate::data::model::{Continent, CountryRecord};
use kurbo::Shape as _;

use crate::foundation::core::{Millis, Point, Rgba8};
use crate::render::tooltip::tooltip_text;
use crate::render::transition::{Ease, MarkAttrs, Transition};
use crate::scale::encoding::Encodings;

/// Timing applied to every transition started by a reconcile pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionOpts {
    /// Tween duration.
    pub duration_ms: u64,
    /// Tween easing.
    pub ease: Ease,
}

/// A retained circle keyed by country.
#[derive(Clone, Debug)]
pub struct Mark {
    key: String,
    continent: Continent,
    fill: Rgba8,
    tooltip: String,
    transition: Transition,
}

impl Mark {
    /// Country key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Fill assigned when the mark entered.
    pub fn fill(&self) -> Rgba8 {
        self.fill
    }

    /// Continent of the bound record.
    pub fn continent(&self) -> Continent {
        self.continent
    }

    /// Hover text for the bound record.
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Geometry at `now`.
    pub fn attrs_at(&self, now: Millis) -> MarkAttrs {
        self.transition.sample(now)
    }

    /// Geometry once the running transition completes.
    pub fn target(&self) -> MarkAttrs {
        self.transition.target()
    }
}

/// Resolved state of one mark at a point in time.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkSample {
    /// Country key.
    pub key: String,
    /// Interpolated geometry.
    pub attrs: MarkAttrs,
    /// Fill colour.
    pub fill: Rgba8,
    /// Hover text.
    pub tooltip: String,
}

/// Outcome of a reconcile pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Marks created for newly present keys.
    pub entered: usize,
    /// Surviving marks re-targeted.
    pub updated: usize,
    /// Marks removed for absent keys.
    pub exited: usize,
}

/// Retained scene of keyed marks, in paint order.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    marks: Vec<Mark>,
}

impl Scene {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Join `records` (keyed by country) against the current marks.
    ///
    /// Absent keys are removed immediately. New keys are appended with their fill fixed from the
    /// colour scale and start tweening from the origin with zero radius. Every bound mark then
    /// tweens towards its encoded position and radius, starting from wherever it is at `now`, so
    /// a transition still in flight is interrupted rather than queued.
    pub fn reconcile(
        &mut self,
        records: &[&CountryRecord],
        enc: &Encodings,
        now: Millis,
        opts: TransitionOpts,
    ) -> ReconcileStats {
        let incoming: HashSet<&str> = records.iter().map(|r| r.country.as_str()).collect();

        let before = self.marks.len();
        self.marks.retain(|m| incoming.contains(m.key.as_str()));
        let mut stats = ReconcileStats {
            exited: before - self.marks.len(),
            ..ReconcileStats::default()
        };

        let mut position: HashMap<String, usize> = self
            .marks
            .iter()
            .enumerate()
            .map(|(i, m)| (m.key.clone(), i))
            .collect();

        for record in records {
            let target = enc.encode(record);
            let to = MarkAttrs {
                cx: target.cx,
                cy: target.cy,
                r: target.r,
            };

            match position.get(record.country.as_str()) {
                Some(&i) => {
                    let mark = &mut self.marks[i];
                    let from = mark.attrs_at(now);
                    mark.transition = Transition::new(from, to, now, opts.duration_ms, opts.ease);
                    mark.continent = record.continent;
                    mark.tooltip = tooltip_text(record);
                    stats.updated += 1;
                }
                None => {
                    self.marks.push(Mark {
                        key: record.country.clone(),
                        continent: record.continent,
                        fill: target.fill,
                        tooltip: tooltip_text(record),
                        transition: Transition::new(
                            MarkAttrs::default(),
                            to,
                            now,
                            opts.duration_ms,
                            opts.ease,
                        ),
                    });
                    position.insert(record.country.clone(), self.marks.len() - 1);
                    stats.entered += 1;
                }
            }
        }

        tracing::debug!(
            entered = stats.entered,
            updated = stats.updated,
            exited = stats.exited,
            "scene reconciled"
        );
        stats
    }

    /// Marks in paint order.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// `true` when nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Look up a mark by key.
    pub fn get(&self, key: &str) -> Option<&Mark> {
        self.marks.iter().find(|m| m.key == key)
    }

    /// Resolve every mark at `now`.
    pub fn sample(&self, now: Millis) -> Vec<MarkSample> {
        self.marks
            .iter()
            .map(|m| MarkSample {
                key: m.key.clone(),
                attrs: m.attrs_at(now),
                fill: m.fill,
                tooltip: m.tooltip.clone(),
            })
            .collect()
    }

    /// Topmost mark whose circle contains `p` (plot coordinates) at `now`.
    pub fn hit_test(&self, p: Point, now: Millis) -> Option<&Mark> {
        self.marks.iter().rev().find(|m| {
            let a = m.attrs_at(now);
            a.r > 0.0 && kurbo::Circle::new((a.cx, a.cy), a.r).contains(p)
        })
    }

    /// `true` while any mark is still tweening at `now`.
    pub fn is_animating(&self, now: Millis) -> bool {
        self.marks.iter().any(|m| !m.transition.is_finished(now))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
