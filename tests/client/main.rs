//! Client application tests: the view controllers driven against a live server.

#![cfg(all(feature = "server", feature = "client"))]
