// App layer: wires config, provider client and hosting adapters together.

pub mod server;
