/*!
# Pantry Drive-Up

A local web form for a food pantry's drive-up line. Volunteers tick the
groceries a family asked for, and submitting the form prints a packing list
on the pantry's printer.

## Overview

The catalog of grocery sections and items lives in a spreadsheet on the
volunteer laptop's desktop (`~/Desktop/DriveThruGroceryList.xlsx`) so it can
be edited without touching the program. The first run copies a default
spreadsheet there; after that the file is only read.

## Request Flow

1. `GET /` renders every catalog section as a group of checkboxes
2. `POST /print` decodes the posted family size and items
3. The packing list is rendered to HTML with a banner in the family's color
4. wkhtmltopdf turns the HTML into a Letter-size PDF
5. The PDF goes to the default printer (`lp`, or `PDFtoPrinter.exe` on Windows)
6. The browser gets back `Success`

## Family Size Bands

| Band        | Banner    |
|-------------|-----------|
| `1: Yellow` | `#ffff00` |
| `2-4: Blue` | `#6464ff` |
| `5+: Pink`  | `#ff69b4` |

## Modules

- **catalog**: seeding and loading the grocery spreadsheet (xlsx or csv)
- **workbook**: writing a catalog as an xlsx workbook
- **names**: section name to form field identifier table
- **family**: family size bands and their colors
- **packing**: decoding submissions into packing lists
- **render**: handlebars templates for the form and the packing list
- **printer**: HTML to PDF conversion and printer dispatch
- **network**: finding the LAN address to serve on
- **config**: settings from the environment and command line
- **app**: routing and request handlers

## REST API Endpoints

- `GET /` - Order form
- `POST /print` - Print a packing list (form encoded, `family_size` plus one field per selected item)
- `GET|POST /reprint` - Not implemented yet
- `/static/...` - Stylesheet and other assets
*/

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod family;
pub mod names;
pub mod network;
pub mod packing;
pub mod printer;
pub mod render;
pub mod workbook;

pub use error::*;
