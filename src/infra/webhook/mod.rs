pub mod http_webhook_service;
