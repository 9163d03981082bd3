mod order_map;
mod pipeline;
mod properties;
