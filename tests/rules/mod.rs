mod code_block_check_test;
mod heading_check_test;
mod image_check_test;
mod inline_suppression_test;
mod link_check_test;
mod syntax_scan_test;
