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

//! Error types for the rendering subsystem.

use std::fmt;

/// An error surfaced by the render system.
///
/// Renderer errors are non-fatal by design: the engine logs them and moves
/// on to the next frame. No operation is retried within a frame.
#[derive(Debug)]
pub enum RenderError {
    /// No suitable graphics adapter or logical device could be acquired.
    BackendUnavailable {
        /// What the backend reported during acquisition.
        details: String,
    },
    /// The presentation surface could not be created or configured.
    SurfaceCreation {
        /// What the backend reported.
        details: String,
    },
    /// The current frame's surface texture could not be acquired; the frame
    /// is skipped and the next one follows.
    SurfaceAcquire {
        /// What the backend reported.
        details: String,
    },
    /// A frame-sequence operation was called out of order (e.g. `end_scene`
    /// without `begin_scene`).
    FrameOutOfOrder {
        /// The operation that was called.
        operation: &'static str,
    },
    /// The render system has not been initialized with a window yet.
    NotInitialized,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::BackendUnavailable { details } => {
                write!(f, "Graphics backend unavailable: {details}")
            }
            RenderError::SurfaceCreation { details } => {
                write!(f, "Failed to create presentation surface: {details}")
            }
            RenderError::SurfaceAcquire { details } => {
                write!(f, "Failed to acquire frame surface texture: {details}")
            }
            RenderError::FrameOutOfOrder { operation } => {
                write!(f, "Frame operation '{operation}' called out of order")
            }
            RenderError::NotInitialized => {
                write!(f, "Render system used before initialization")
            }
        }
    }
}

impl std::error::Error for RenderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_operation() {
        let err = RenderError::FrameOutOfOrder {
            operation: "end_scene",
        };
        assert!(err.to_string().contains("end_scene"));

        let err = RenderError::SurfaceAcquire {
            details: "Outdated".to_string(),
        };
        assert!(err.to_string().contains("Outdated"));
    }
}
