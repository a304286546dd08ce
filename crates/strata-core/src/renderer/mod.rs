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

//! The render-system contract the engine drives once per frame.
//!
//! The engine consumes the renderer strictly as a collaborator: begin a
//! scene, submit objects, end the scene, paint the overlay, present. The
//! concrete wgpu implementation lives in `strata-infra`.

mod error;
mod system;

pub use self::error::RenderError;
pub use self::system::{
    OverlayPaint, RenderObject, RenderStats, RenderSystem, SceneView, Vertex,
};
