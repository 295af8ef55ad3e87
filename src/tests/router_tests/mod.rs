mod interaction_tests;
mod page_tests;
