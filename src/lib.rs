pub mod app;
pub mod cluster;
pub mod corpus;
pub mod layout;
pub mod links;
pub mod pack;
pub mod scene;
pub mod similarity;
pub mod util;
pub mod viewport;
