mod alternations_tests;
mod captures_tests;
mod definitions_tests;
mod quantifiers_tests;
mod sequences_tests;
mod terminals_tests;
mod trivia_tests;
