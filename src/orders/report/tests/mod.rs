mod common;
mod kpis;
