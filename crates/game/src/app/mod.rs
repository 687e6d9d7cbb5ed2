pub(crate) mod bootstrap;
mod cues;
mod fight;
mod menu;
