mod favorite_tests;
