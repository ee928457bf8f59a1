pub mod question_config;
