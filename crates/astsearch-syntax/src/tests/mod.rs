mod behaviour;
mod unit;
