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

//! Event primitives for the engine's synchronous dispatch pipeline.
//!
//! An [`Event`] is a tagged value describing a single occurrence (window
//! resize, key press, mouse motion, ...) plus one mutable `handled` flag.
//! Events are produced by the windowing backend, passed by mutable reference
//! through the routing pipeline, and discarded once the pass returns.
//!
//! The [`EventDispatcher`] is the single-dispatch router: it matches an
//! event's [`EventKind`] against a target kind and conditionally invokes a
//! handler, recording the handler's claim on the event. Dispatch is an exact
//! discriminant comparison; a mismatched kind is a no-op, not an error.

mod dispatcher;
mod types;

pub use self::dispatcher::EventDispatcher;
pub use self::types::{Event, EventData, EventKind, MouseButton};
