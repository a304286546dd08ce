// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Strata Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! that define the engine's architecture.
//!
//! The heart of the crate is the layer composition model: an [`Event`] is a
//! tagged value routed through an [`EventDispatcher`], and a [`LayerStack`]
//! composes [`Layer`]s that receive ordered update/render/event callbacks.
//! The [`platform`] and [`renderer`] modules define the contracts that
//! concrete windowing and GPU backends implement in `strata-infra`.

#![warn(missing_docs)]

pub mod event;
pub mod layer;
pub mod math;
pub mod platform;
pub mod renderer;

pub use event::{Event, EventData, EventDispatcher, EventKind, MouseButton};
pub use layer::{Layer, LayerStack};
