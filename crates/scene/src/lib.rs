pub mod camera;
pub mod components;
pub mod composer;
pub mod entity;
pub mod light;
pub mod prefabs;
pub mod world;

pub use camera::*;
pub use composer::*;
pub use light::*;
pub use world::*;
