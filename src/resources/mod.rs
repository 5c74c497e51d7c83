//! ECS resources made available to systems.
//!
//! Long-lived data shared by every actor: timing, tuning, the action lookup
//! table, loaded action sets, and bookkeeping for the engine facade.
//!
//! Overview
//! - `actionstore` – action data types and the cache of loaded action sets
//! - `actiontable` – behavioral state → action index lookup
//! - `animconfig` – playback tuning loaded from an INI file
//! - `registry` – actor id → entity index
//! - `tickreport` – per-actor errors collected during a tick
//! - `worldtime` – engine clock
pub mod actionstore;
pub mod actiontable;
pub mod animconfig;
pub mod registry;
pub mod tickreport;
pub mod worldtime;
