//! Router tests driving the HTTP surface with `oneshot`

mod chat_rpc_tests;
mod group_rpc_tests;
mod health_tests;
