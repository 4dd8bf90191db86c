//=========================================================================
// Framepulse — Library Root
//
// This crate defines the public API surface of Framepulse, a frame
// lifecycle dispatch service: one shared registry that forwards a host
// loop's per-frame phases (fixed, update, late) to subscribed callbacks,
// with a global pause switch and bulk teardown.
//
// Responsibilities:
// - Expose the registry (`UpdateDispatcher`), its session-wide handle
//   (`UpdaterService`), and the composition root (`Runtime`)
// - Keep the host loop internals hidden behind the `Runtime` facade and
//   the cross-thread `HostController`
//
// Typical usage:
// ```no_run
// use framepulse::prelude::*;
//
// fn main() {
//     let runtime = RuntimeBuilder::new().build();
//     let controller = runtime.controller();
//
//     runtime
//         .init(|service| {
//             service.subscribe(callback(|| println!("step")), UpdatePhase::Fixed);
//             service.subscribe(callback(|| println!("frame")), UpdatePhase::Update);
//         })
//         .run(); // blocks until controller.shutdown() or controller drop
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the registry itself: phases, the dispatcher, and the
// shared service handle. Embedders with their own frame loop use it
// directly and call the service's phase entry points themselves.
//
// `host` exposes the cross-thread control surface (`HostController`);
// the loop internals stay private.
//
pub mod core;
pub mod host;

//--- Internal Modules ----------------------------------------------------
//
// `runtime` defines the composition root: it constructs the session's
// single service, hands out handles, and drives the host loop.
//
mod runtime;

pub mod prelude;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the composition root as the main entry point, so users can
// simply `use framepulse::RuntimeBuilder;` without knowing the internal
// module structure.
//
pub use runtime::{Runtime, RuntimeBuilder};
