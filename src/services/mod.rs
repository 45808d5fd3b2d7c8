pub mod corpus;
pub mod craft_service;
