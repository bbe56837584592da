//! Pure layout logic for Vastu floor planning.
//!
//! This crate contains the decision-making engine that turns a residential
//! design request into compass-zone layouts and compliance scores. It has
//! no HTTP, rendering or storage dependencies: functions take plain data
//! and return results, with randomness injected by the caller.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`design`] | End-to-end pipeline: allocation, per-floor optimization, scoring |
//! | [`error`] | Rule-file and identifier parsing errors |
//! | [`floors`] | Floor-count parsing and room-to-floor allocation |
//! | [`optimizer`] | Greedy zone assignment with randomized variants |
//! | [`relationships`] | Per-floor adjacency anchors between rooms |
//! | [`request`] | Design request model and boundary validation |
//! | [`rooms`] | Room kinds and structured room identifiers |
//! | [`rules`] | Zone rule table and strictness levels |
//! | [`scoring`] | Compliance score and per-room rationale |
//! | [`zones`] | The 3×3 compass grid and the `Flexible` sentinel |

pub mod design;
pub mod error;
pub mod floors;
pub mod optimizer;
pub mod relationships;
pub mod request;
pub mod rooms;
pub mod rules;
pub mod scoring;
pub mod zones;
