pub mod epic_server;
