pub mod answer_mapper;
pub mod error_mapper;
pub mod question_mapper;
