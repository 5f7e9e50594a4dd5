//! Navigation host and script runner over the real feature bindings
