pub mod upstream_reqwest;
