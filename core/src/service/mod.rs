pub mod task_list_service;
