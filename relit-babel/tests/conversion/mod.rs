mod properties;
mod scenarios;
mod strip;
