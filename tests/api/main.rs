mod health_check;
mod helpers;
mod startup;
