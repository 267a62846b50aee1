mod ai_tests;
mod wishlist_tests;
