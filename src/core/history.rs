/// S&P 500 annual total returns in percent, 2023 first and running back to 1969.
/// Cycled in this order.
pub const SP500_ANNUAL: [f64; 55] = [
    26.29, 25.02, -18.11, 28.71, 18.40, 31.49, -4.38, 21.83,
    11.96, 1.38, 13.69, 32.39, 16.00, 2.11, 15.06, 26.46,
    -37.00, 5.49, 15.79, 4.91, 10.88, 28.68, -22.10, -11.89,
    -9.10, 21.04, 28.58, 33.36, 22.96, 37.58, 1.32, 10.08,
    7.62, 30.47, -3.10, 31.69, 16.61, 5.25, 18.67, 31.73,
    6.27, 22.56, 21.55, -4.91, 32.42, 18.44, 6.56, -7.18,
    23.84, 37.20, -26.47, -14.66, 18.98, 14.31, 4.01,
];

/// S&P 500 monthly returns in percent, January 1985 through December 2024.
pub const SP500_MONTHLY: [f64; 480] = [
    // 1985
    5.8, 2.1, -1.2, 3.4, 2.8, 1.9, -2.1, 4.2, 1.5, -3.8, 2.9, 4.1,
    // 1986
    2.3, 5.1, 1.8, -0.9, 3.2, 2.4, -1.7, 3.8, 2.1, -2.5, 4.3, 2.7,
    // 1987
    13.2, 4.4, -2.8, 1.9, 2.1, 3.5, 6.8, 3.2, -3.3, -21.5, -8.2, 6.1,
    // 1988
    4.2, 2.8, 1.9, -1.2, 3.4, 2.1, 1.8, 2.9, 3.1, -2.8, 1.5, 2.4,
    // 1989
    7.1, 1.8, 2.9, 4.2, 3.1, 2.8, 1.9, 0.8, -1.2, 2.4, 1.8, 2.1,
    // 1990
    -6.8, 2.1, 1.9, 2.8, 3.4, -0.8, -3.2, -9.2, -5.1, 2.8, 6.1, 2.4,
    // 1991
    4.2, 3.8, 2.1, 1.9, 2.8, 1.5, 2.4, 3.1, 1.8, 2.9, 1.2, 11.2,
    // 1992
    2.1, 1.8, 2.4, 1.9, 2.8, 1.5, 2.1, 1.8, 2.4, 1.9, 2.8, 1.5,
    // 1993
    0.8, 1.2, 1.8, 2.1, 1.9, 2.4, 1.8, 2.1, 1.9, 2.4, 1.8, 1.2,
    // 1994
    3.1, -2.8, -1.9, 1.2, 2.1, 1.8, 2.4, 1.9, 2.1, 1.8, 2.4, 1.9,
    // 1995
    2.8, 3.4, 2.1, 1.9, 2.8, 1.5, 2.4, 3.1, 1.8, 2.9, 4.2, 1.8,
    // 1996
    3.1, 0.8, 2.1, 1.9, 2.8, 1.5, 2.4, 1.8, 2.1, 1.9, 2.4, 1.8,
    // 1997
    6.1, 0.8, -4.2, 5.8, 5.1, 4.2, 7.8, -5.8, 5.1, -3.2, 4.2, 1.8,
    // 1998
    1.0, 7.0, 4.9, 0.8, -1.8, 3.8, -1.2, -14.5, 6.2, 8.1, 5.8, 5.1,
    // 1999
    4.1, -2.9, 3.8, 3.9, -2.5, 5.4, -3.2, -0.5, -2.8, 6.2, 1.9, 5.8,
    // 2000
    -5.1, 1.9, 9.7, -3.1, -2.2, 2.4, -1.8, 6.1, -5.4, -0.5, -8.0, 0.4,
    // 2001
    3.5, -9.2, -6.4, 7.7, 0.4, -2.5, -1.2, -6.4, -8.2, 1.8, 7.5, 0.8,
    // 2002
    -1.6, -2.1, 3.7, -6.1, -0.9, -7.2, -7.9, 0.5, -11.0, 8.6, 5.7, -6.0,
    // 2003
    -2.7, -1.7, 1.0, 8.1, 5.1, 1.2, 1.6, 1.8, -1.2, 5.5, 0.9, 5.1,
    // 2004
    1.7, 1.2, -1.6, -1.7, 1.2, 1.8, -3.4, 0.4, 0.8, 1.4, 3.9, 3.2,
    // 2005
    -2.5, 1.9, -1.9, -2.0, 3.0, 0.0, 3.6, -1.2, 0.7, -1.8, 3.5, 0.0,
    // 2006
    2.5, 0.0, 1.2, 1.3, -3.1, 0.2, 0.3, 2.1, 2.5, 3.2, 1.8, 1.4,
    // 2007
    1.4, -2.2, 1.0, 4.3, 3.3, -1.8, -3.2, 1.3, 3.6, 1.5, -4.4, -0.9,
    // 2008
    -6.1, -3.5, -0.6, 4.8, 1.1, -8.6, -0.8, 1.2, -9.1, -16.9, -7.2, 0.8,
    // 2009
    -8.6, -10.9, 8.5, 9.4, 5.3, 0.0, 7.4, 3.4, 3.6, -1.9, 5.7, 1.8,
    // 2010
    -3.7, 2.9, 5.9, 1.5, -8.2, -5.4, 6.9, -4.7, 8.8, 3.7, -0.2, 6.5,
    // 2011
    2.3, 3.2, -0.1, 2.8, -1.4, -1.8, -2.2, -5.7, -7.2, 10.8, -0.5, 0.9,
    // 2012
    4.4, 4.1, 3.1, -0.8, -6.3, 4.0, 1.3, 2.0, 2.4, -1.9, 0.3, 0.7,
    // 2013
    5.0, 1.1, 3.6, 1.8, 2.1, -1.5, 4.9, -3.1, 3.0, 4.5, 2.8, 2.4,
    // 2014
    -3.6, 4.3, 0.7, 0.6, 2.1, 1.9, -1.5, 3.8, -1.6, 2.3, 2.5, -0.4,
    // 2015
    -3.1, 5.5, -1.7, 0.9, 1.0, -2.1, 2.0, -6.3, -2.6, 8.3, 0.1, -1.8,
    // 2016
    -5.1, -0.4, 6.6, 0.3, 1.5, 0.1, 3.6, -0.1, -0.1, -1.9, 3.4, 1.8,
    // 2017
    1.8, 3.7, 0.0, 0.9, 1.2, 0.5, 1.9, 0.1, 1.9, 2.2, 2.8, 1.1,
    // 2018
    5.6, -3.9, -2.7, 0.3, 2.2, 0.5, 3.6, 3.0, 0.4, -6.9, 1.8, -9.2,
    // 2019
    7.9, 3.0, 1.8, 3.9, -6.6, 6.9, 1.3, -1.8, 1.7, 2.0, 3.4, 2.9,
    // 2020
    -0.2, -8.4, -12.5, 12.7, 4.5, 1.8, 5.5, 7.0, -3.9, -2.8, 10.8, 3.7,
    // 2021
    -1.0, 2.6, 4.2, 5.2, 0.6, 2.2, 2.3, 2.9, -4.8, 6.9, -0.8, 4.4,
    // 2022
    -5.3, -3.1, 3.6, -8.8, 0.0, -8.4, 9.1, -4.2, -9.3, 8.0, 5.4, -5.9,
    // 2023
    6.2, -2.6, 3.5, 1.5, 0.3, 6.5, 3.1, -1.8, -4.9, -2.2, 8.9, 4.4,
    // 2024
    1.6, 5.2, 3.1, -4.2, 4.8, 3.5, 2.1, 1.8, -4.9, 4.6, 2.8, 1.2,
];
