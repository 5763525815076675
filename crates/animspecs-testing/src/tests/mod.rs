mod robot_tests;
