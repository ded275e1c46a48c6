mod engine_tests;
mod mocks;
