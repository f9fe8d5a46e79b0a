mod export;
mod file_stores;
mod loading;
mod scenarios;
