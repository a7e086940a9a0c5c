pub mod forecast;
pub mod news;
pub mod openweather;
pub mod tmdb;
pub mod wikipedia;
pub mod xkcd;
pub mod yahoo;
