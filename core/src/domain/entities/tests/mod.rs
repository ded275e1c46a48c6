mod pin_record_tests;
