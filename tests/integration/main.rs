mod scrape_tests;
